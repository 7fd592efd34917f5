// ABOUTME: Integration tests for the domain façade and workout models
// ABOUTME: Exercises workout listing, the after cursor, and trackpoint fetching end to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

use chrono::{TimeZone, Utc};
use endomondo_client::{Endomondo, Error, Trackpoint, WorkoutQuery};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod helpers;
use helpers::{call_blocking, test_config};

#[tokio::test(flavor = "multi_thread")]
async fn list_workouts_wraps_json_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/workout/list"))
        .and(query_param("authToken", "tok"))
        .and(query_param("maxResults", "40"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": [{"id": "1", "sport": "2"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server);
    let (id, sport, display) =
        call_blocking(move || -> endomondo_client::Result<(String, &'static str, String)> {
        let client = Endomondo::with_token_and(config, "tok")?;
        let workouts = client.list_workouts(&WorkoutQuery::default())?;
        assert_eq!(workouts.len(), 1);
        let workout = &workouts[0];
        Ok((
            workout.id().to_owned(),
            workout.sport(),
            workout.to_string(),
        ))
    })
    .await
    .unwrap();

    assert_eq!(id, "1");
    assert_eq!(sport, "Cycling, sport");
    assert_eq!(display, "#1 - Cycling, sport");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_workouts_accepts_numeric_ids_and_sport_codes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/workout/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"data": [{"id": 42, "sport": 0, "duration": 1800}, {"id": 43, "sport": 9999}]}),
        ))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let summaries = call_blocking(
        move || -> endomondo_client::Result<Vec<(String, &'static str)>> {
        let client = Endomondo::with_token_and(config, "tok")?;
        let workouts = client.list_workouts(&WorkoutQuery::default())?;
        Ok(workouts
            .iter()
            .map(|w| (w.id().to_owned(), w.sport()))
            .collect::<Vec<_>>())
    })
    .await
    .unwrap();

    assert_eq!(
        summaries,
        vec![("42".to_owned(), "Running"), ("43".to_owned(), "Other")]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn after_cursor_is_sent_in_server_format() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/workout/list"))
        .and(query_param("maxResults", "10"))
        .and(query_param("after", "2020-01-01 00:00:00 UTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server);
    let count = call_blocking(move || -> endomondo_client::Result<usize> {
        let client = Endomondo::with_token_and(config, "tok")?;
        let query = WorkoutQuery {
            max_results: 10,
            after: Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()),
        };
        Ok(client.list_workouts(&query)?.len())
    })
    .await
    .unwrap();

    assert_eq!(count, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn points_decodes_track_records_and_drops_malformed_ones() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/workout/list"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "1", "sport": "2"}]})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/readTrack"))
        .and(query_param("trackId", "1"))
        .and(query_param("authToken", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "OK\nheader\n2020-01-01 00:00:00 UTC;x;1.0;2.0;x;x;3.0;4.0;x\nbad;only;three;fields",
        ))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let points = call_blocking(move || -> endomondo_client::Result<Vec<Trackpoint>> {
        let client = Endomondo::with_token_and(config, "tok")?;
        let workouts = client.list_workouts(&WorkoutQuery::default())?;
        workouts[0].points()
    })
    .await
    .unwrap();

    assert_eq!(points.len(), 1);
    let point = &points[0];
    assert_eq!(point.time, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(point.latitude, Some(1.0));
    assert_eq!(point.longitude, Some(2.0));
    assert_eq!(point.altitude, Some(3.0));
    assert_eq!(point.heart_rate, Some(4.0));
}

#[tokio::test(flavor = "multi_thread")]
async fn points_refetches_on_every_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/workout/list"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "1", "sport": "2"}]})),
        )
        .mount(&server)
        .await;
    // Nothing is memoized: two reads mean two round trips
    Mock::given(method("GET"))
        .and(path("/readTrack"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("OK\nheader\n2020-01-01 00:00:00 UTC;;1.0;2.0;;;3.0;4.0;"),
        )
        .expect(2)
        .mount(&server)
        .await;

    let config = test_config(&server);
    type PointPair = (Vec<Trackpoint>, Vec<Trackpoint>);
    let (first, second) = call_blocking(move || -> endomondo_client::Result<PointPair> {
        let client = Endomondo::with_token_and(config, "tok")?;
        let workouts = client.list_workouts(&WorkoutQuery::default())?;
        Ok((workouts[0].points()?, workouts[0].points()?))
    })
    .await
    .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_json_envelope_is_a_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/workout/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"workouts": []})))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let error = call_blocking(move || {
        let client = Endomondo::with_token_and(config, "tok")?;
        client.list_workouts(&WorkoutQuery::default()).map(|w| w.len())
    })
    .await
    .unwrap_err();

    assert!(matches!(error, Error::Json { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn workout_record_without_id_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/workout/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"sport": "2"}]})))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let error = call_blocking(move || {
        let client = Endomondo::with_token_and(config, "tok")?;
        client.list_workouts(&WorkoutQuery::default()).map(|w| w.len())
    })
    .await
    .unwrap_err();

    assert!(matches!(error, Error::MissingWorkoutId));
}
