// ABOUTME: Domain façade over the Endomondo protocol adapter
// ABOUTME: Exposes authentication and workout listing, wrapping raw JSON records
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::errors::Result;
use crate::models::Workout;
use crate::protocol::{Protocol, ProtocolConfig};
use crate::time::to_server_time;

/// Default page size for [`Endomondo::list_workouts`]
pub const DEFAULT_MAX_RESULTS: u32 = 40;

/// Query parameters for listing workouts.
///
/// `Default` asks for the 40 most recent workouts with no cutoff.
#[derive(Debug, Clone)]
pub struct WorkoutQuery {
    /// Maximum number of workouts to return
    pub max_results: u32,
    /// Exclusive UTC cutoff: only workouts recorded after this time
    pub after: Option<DateTime<Utc>>,
}

impl Default for WorkoutQuery {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            after: None,
        }
    }
}

/// High-level client for the Endomondo mobile API.
///
/// Construct with credentials to perform the PAIR handshake, or with a
/// previously persisted token to skip it. One blocking HTTP session is
/// reused for the lifetime of the client.
pub struct Endomondo {
    protocol: Protocol,
}

impl Endomondo {
    /// Authenticate with email and password against the default API base.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transport`] / [`crate::Error::Protocol`] /
    /// [`crate::Error::EmptyResponse`] when the handshake fails. A handshake
    /// that succeeds without producing a token is not an error; check
    /// [`Endomondo::auth_token`].
    pub fn connect(email: &str, password: &str) -> Result<Self> {
        Self::connect_with(ProtocolConfig::default(), email, password)
    }

    /// Authenticate with email and password against a custom configuration.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Endomondo::connect`].
    pub fn connect_with(config: ProtocolConfig, email: &str, password: &str) -> Result<Self> {
        Ok(Self {
            protocol: Protocol::connect(config, email, password)?,
        })
    }

    /// Reuse a persisted token against the default API base, skipping the handshake.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transport`] if the HTTP client cannot be built.
    pub fn with_token(token: impl Into<String>) -> Result<Self> {
        Self::with_token_and(ProtocolConfig::default(), token)
    }

    /// Reuse a persisted token against a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transport`] if the HTTP client cannot be built.
    pub fn with_token_and(config: ProtocolConfig, token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            protocol: Protocol::with_token(config, token)?,
        })
    }

    /// The session's auth token, for the caller to persist and reuse later.
    ///
    /// `None` when the handshake completed but returned no token; callers
    /// must treat that as an authentication failure.
    #[must_use]
    pub fn auth_token(&self) -> Option<&str> {
        self.protocol.auth_token()
    }

    /// List recorded workouts, most recent first per service convention.
    ///
    /// Order follows the server response and is not independently guaranteed
    /// by this client.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transport`] on HTTP failure,
    /// [`crate::Error::Json`] when the response is not the expected envelope,
    /// and [`crate::Error::MissingWorkoutId`] when a record carries no id.
    pub fn list_workouts(&self, query: &WorkoutQuery) -> Result<Vec<Workout<'_>>> {
        let mut params = vec![("maxResults", query.max_results.to_string())];
        if let Some(after) = &query.after {
            params.push(("after", to_server_time(after)));
        }

        let records = self.protocol.call_json("api/workout/list", &params)?;
        debug!(count = records.len(), "listed workouts");

        records
            .into_iter()
            .map(|record| Workout::from_record(&self.protocol, record))
            .collect()
    }
}
