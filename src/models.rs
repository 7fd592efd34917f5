// ABOUTME: Workout and trackpoint domain models for the Endomondo mobile API
// ABOUTME: Wraps raw JSON workout records and decodes semicolon-delimited track data
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::{Error, Result};
use crate::protocol::Protocol;
use crate::sports::sport_name;
use crate::time::from_server_time;

/// Minimum number of `;`-separated fields in a well-formed track record.
/// Shorter records are treated as malformed and dropped, not raised.
const MIN_TRACK_FIELDS: usize = 9;

/// One timestamped GPS/heart-rate sample within a workout.
///
/// Samples are immutable values in the order the service returned them
/// (chronological). An empty field on the wire decodes to `None`, never to
/// zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trackpoint {
    /// Sample timestamp, always UTC
    pub time: DateTime<Utc>,
    /// Latitude in degrees, when the sample carried a position
    pub latitude: Option<f64>,
    /// Longitude in degrees, when the sample carried a position
    pub longitude: Option<f64>,
    /// Altitude in meters
    pub altitude: Option<f64>,
    /// Heart rate in beats per minute
    pub heart_rate: Option<f64>,
}

impl Trackpoint {
    /// Decode one `;`-separated track record.
    ///
    /// Returns `Ok(None)` for records with fewer than nine fields; those are
    /// filtered out by the caller rather than failing the whole track.
    fn parse(record: &str) -> Result<Option<Self>> {
        let fields: Vec<&str> = record.split(';').collect();
        if fields.len() < MIN_TRACK_FIELDS {
            return Ok(None);
        }

        Ok(Some(Self {
            time: from_server_time(fields[0])?,
            latitude: parse_sample("latitude", fields[2])?,
            longitude: parse_sample("longitude", fields[3])?,
            altitude: parse_sample("altitude", fields[6])?,
            heart_rate: parse_sample("heart rate", fields[7])?,
        }))
    }
}

fn parse_sample(field: &'static str, value: &str) -> Result<Option<f64>> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| Error::InvalidSample {
            field,
            value: value.to_owned(),
        })
}

/// One recorded workout, wrapping the raw property map the service returned.
///
/// Holds a back-reference to the session for fetching track data on demand.
/// Never mutated after construction.
pub struct Workout<'a> {
    protocol: &'a Protocol,
    id: String,
    properties: Map<String, Value>,
}

impl<'a> Workout<'a> {
    /// Wrap one JSON workout record from the list endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingWorkoutId`] when the record carries no usable
    /// `id` property.
    pub(crate) fn from_record(
        protocol: &'a Protocol,
        properties: Map<String, Value>,
    ) -> Result<Self> {
        let id = match properties.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => return Err(Error::MissingWorkoutId),
        };
        Ok(Self {
            protocol,
            id,
            properties,
        })
    }

    /// The server-assigned workout id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The raw property bag as returned by the list endpoint.
    #[must_use]
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// One raw property by key.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Display name of the workout's sport.
    ///
    /// A missing or non-numeric `sport` property decodes to "Other", same as
    /// an unrecognized code.
    #[must_use]
    pub fn sport(&self) -> &'static str {
        self.sport_code().map_or("Other", sport_name)
    }

    fn sport_code(&self) -> Option<i64> {
        match self.properties.get("sport") {
            Some(Value::Number(code)) => code.as_i64(),
            Some(Value::String(code)) => code.parse().ok(),
            _ => None,
        }
    }

    /// Fetch this workout's trackpoints from the service.
    ///
    /// Every call is a fresh `readTrack` round trip; nothing is memoized, so
    /// callers that need the points more than once should hold on to the
    /// returned vector. The first line of the track body is a header and is
    /// discarded; malformed records (fewer than nine fields) are dropped
    /// silently.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] / [`Error::Protocol`] /
    /// [`Error::EmptyResponse`] for the underlying call, and
    /// [`Error::InvalidTimestamp`] / [`Error::InvalidSample`] when a
    /// well-formed record carries an unparseable value.
    pub fn points(&self) -> Result<Vec<Trackpoint>> {
        let lines = self
            .protocol
            .call_text("readTrack", &[("trackId", self.id.clone())])?;

        let mut points = Vec::new();
        // Line 0 of the decoded body is a column header
        for record in lines.iter().skip(1) {
            match Trackpoint::parse(record)? {
                Some(point) => points.push(point),
                None => debug!(workout_id = %self.id, record, "dropping malformed track record"),
            }
        }
        Ok(points)
    }
}

impl fmt::Display for Workout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} - {}", self.id, self.sport())
    }
}
