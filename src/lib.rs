// ABOUTME: Client library for the Endomondo mobile API
// ABOUTME: Authentication, workout listing, and trackpoint retrieval over blocking HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client library for the Endomondo mobile API.
//!
//! The crate is a thin protocol adapter around the service's two response
//! encodings: a line-oriented `key=value` / CSV text format and a JSON
//! envelope. It exposes two operations — list workouts and read a workout's
//! trackpoints — behind a single authenticated session.
//!
//! ```no_run
//! use endomondo_client::{Endomondo, WorkoutQuery};
//!
//! # fn main() -> endomondo_client::Result<()> {
//! let client = Endomondo::connect("user@example.com", "secret")?;
//! for workout in client.list_workouts(&WorkoutQuery::default())? {
//!     println!("{workout}: {} points", workout.points()?.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! All calls are synchronous, blocking round trips; there is no retry layer
//! and no caching. Callers persist the token from
//! [`Endomondo::auth_token`] to skip the handshake on later runs.

/// Domain façade: authentication and workout listing
pub mod client;
/// Error taxonomy for transport and protocol failures
pub mod errors;
/// Workout and trackpoint models
pub mod models;
/// Session/protocol adapter: HTTP session, device identity, response decoders
pub mod protocol;
/// Static sport code table
pub mod sports;
/// Codec for the server's fixed UTC timestamp format
pub mod time;

pub use client::{Endomondo, WorkoutQuery, DEFAULT_MAX_RESULTS};
pub use errors::{Error, Result};
pub use models::{Trackpoint, Workout};
pub use protocol::{default_device_id, DeviceIdentity, Protocol, ProtocolConfig};
pub use sports::sport_name;
pub use time::{from_server_time, to_server_time, SERVER_TIME_FORMAT};
