// ABOUTME: Session and protocol adapter for the Endomondo mobile API
// ABOUTME: Owns the HTTP session, device identity, auth token, and both response decoders
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use gethostname::gethostname;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{Error, Result};

/// Default API base, overridable via the `ENDOMONDO_API_BASE` environment variable.
const DEFAULT_API_BASE: &str = "http://api.mobile.endomondo.com/mobile";

/// Environment variable overriding the API base URL
pub const ENV_API_BASE: &str = "ENDOMONDO_API_BASE";

/// Language tag attached to every authenticated call
const LANGUAGE: &str = "EN";

fn api_base() -> String {
    std::env::var(ENV_API_BASE).unwrap_or_else(|_| DEFAULT_API_BASE.to_owned())
}

/// Generate the default device identifier for this host.
///
/// UUIDv5 of the host's network name under the DNS namespace, so the id is
/// deterministic and stable across runs on the same machine. Callers that
/// need a different identity scheme can set [`DeviceIdentity::device_id`]
/// directly instead.
#[must_use]
pub fn default_device_id() -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_DNS, gethostname().to_string_lossy().as_bytes()).to_string()
}

/// Client identity presented to the service during the PAIR handshake.
///
/// The service only talks to things that look like its mobile app, so the
/// defaults mimic one fixed Android build. Only `device_id` normally varies
/// between installations.
#[derive(Debug, Clone)]
pub struct DeviceIdentity {
    /// Stable per-installation identifier sent as `deviceId`
    pub device_id: String,
    /// Reported operating system name
    pub os: String,
    /// Reported operating system version
    pub os_version: String,
    /// Reported device model
    pub model: String,
    /// Reported application version
    pub app_version: String,
    /// Reported application variant
    pub app_variant: String,
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self {
            device_id: default_device_id(),
            os: "Android".to_owned(),
            os_version: "2.2".to_owned(),
            model: "M".to_owned(),
            app_version: "7.1".to_owned(),
            app_variant: "M-Pro".to_owned(),
        }
    }
}

impl DeviceIdentity {
    /// Synthetic mobile-client `User-Agent` derived from the identity fields.
    #[must_use]
    pub fn user_agent(&self) -> String {
        format!(
            "Dalvik/1.4.0 (Linux; U; {} {}; {} Build/GRI54)",
            self.os, self.os_version, self.model
        )
    }
}

/// Configuration for the protocol adapter
#[derive(Debug, Clone)]
pub struct ProtocolConfig {
    /// API base URL, e.g. `http://api.mobile.endomondo.com/mobile`
    pub base_url: String,
    /// Client identity used for the handshake and the `User-Agent` header
    pub identity: DeviceIdentity,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            base_url: api_base(),
            identity: DeviceIdentity::default(),
        }
    }
}

/// JSON envelope wrapping every JSON-mode response body
#[derive(Debug, Deserialize)]
struct Envelope {
    data: Vec<Map<String, Value>>,
}

/// Single point of contact with the remote service.
///
/// Owns one connection-pooling blocking HTTP client and the auth token
/// obtained from the PAIR handshake (or supplied by the caller). The adapter
/// is immutable once constructed; it takes `&self` everywhere but is not
/// designed for concurrent use from multiple threads — serialize access or
/// build one adapter per thread.
pub struct Protocol {
    client: reqwest::blocking::Client,
    config: ProtocolConfig,
    auth_token: Option<String>,
}

impl Protocol {
    /// Build an adapter and perform the PAIR handshake with the given credentials.
    ///
    /// A handshake that completes transport-wise but yields no `authToken`
    /// line leaves the token unset rather than failing; callers must check
    /// [`Protocol::auth_token`] before treating the session as authenticated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] on connection failure or non-2xx status,
    /// and [`Error::Protocol`] / [`Error::EmptyResponse`] when the handshake
    /// body is malformed.
    pub fn connect(config: ProtocolConfig, email: &str, password: &str) -> Result<Self> {
        let mut protocol = Self::build(config)?;
        protocol.auth_token = protocol.request_auth_token(email, password)?;
        match protocol.auth_token {
            Some(_) => info!(device_id = %protocol.config.identity.device_id, "paired with service"),
            None => warn!("handshake returned no authToken line"),
        }
        Ok(protocol)
    }

    /// Build an adapter around a previously obtained token, skipping the handshake.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn with_token(config: ProtocolConfig, token: impl Into<String>) -> Result<Self> {
        let mut protocol = Self::build(config)?;
        protocol.auth_token = Some(token.into());
        Ok(protocol)
    }

    fn build(config: ProtocolConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.identity.user_agent())
            .build()?;
        Ok(Self {
            client,
            config,
            auth_token: None,
        })
    }

    /// The session's auth token, if the handshake produced one.
    ///
    /// Callers should persist this and reuse it via [`Protocol::with_token`]
    /// to avoid repeated handshakes.
    #[must_use]
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    fn request_auth_token(&self, email: &str, password: &str) -> Result<Option<String>> {
        let identity = &self.config.identity;
        let params = [
            ("email", email.to_owned()),
            ("password", password.to_owned()),
            ("country", "US".to_owned()),
            ("deviceId", identity.device_id.clone()),
            ("os", identity.os.clone()),
            ("appVersion", identity.app_version.clone()),
            ("appVariant", identity.app_variant.clone()),
            ("osVersion", identity.os_version.clone()),
            ("model", identity.model.clone()),
            ("v", "2.4".to_owned()),
            ("action", "PAIR".to_owned()),
        ];

        let response = self.get("auth", &params)?;
        let lines = parse_text(response)?;

        for line in lines {
            if let Some((key, value)) = line.split_once('=') {
                if key == "authToken" {
                    return Ok(Some(value.to_owned()));
                }
            }
        }

        Ok(None)
    }

    /// Issue a GET in text mode and decode the line-oriented body.
    ///
    /// Caller params are merged with the auth token (omitted when the
    /// session has none) and the fixed language tag. The body's first line
    /// must be `OK`; the remaining lines are returned verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] on connection failure or non-2xx status,
    /// [`Error::EmptyResponse`] on an empty 2xx body, and [`Error::Protocol`]
    /// when the status line is not `OK`.
    pub fn call_text(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Vec<String>> {
        let response = self.get(endpoint, &self.merged(params))?;
        parse_text(response)
    }

    /// Issue a GET in JSON mode and return the array at the envelope's `data` key.
    ///
    /// The text-mode status-line convention does not apply here: any
    /// transport-level non-success status fails before the body is read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] on connection failure or non-2xx status,
    /// and [`Error::Json`] when the body is not a `{"data": [...]}` envelope.
    pub fn call_json(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<Map<String, Value>>> {
        let response = self.get(endpoint, &self.merged(params))?;
        let url = response.url().to_string();
        let body = response.text()?;
        let envelope: Envelope =
            serde_json::from_str(&body).map_err(|source| Error::Json { url, source })?;
        Ok(envelope.data)
    }

    /// Issue a GET and hand back the status-checked, undecoded response.
    ///
    /// Escape hatch for endpoints that follow neither the text nor the JSON
    /// convention; the caller interprets the body itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] on connection failure or non-2xx status.
    pub fn call_raw(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<reqwest::blocking::Response> {
        self.get(endpoint, &self.merged(params))
    }

    /// Merge caller params with the session token and language tag.
    fn merged<'p>(&self, params: &[(&'p str, String)]) -> Vec<(&'p str, String)> {
        let mut merged = params.to_vec();
        if let Some(token) = &self.auth_token {
            merged.push(("authToken", token.clone()));
        }
        merged.push(("language", LANGUAGE.to_owned()));
        merged
    }

    fn get(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<reqwest::blocking::Response> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint);
        debug!(%url, "issuing mobile API request");

        let response = self.client.get(&url).query(params).send()?;
        debug!(status = %response.status(), %url, "mobile API response");

        Ok(response.error_for_status()?)
    }
}

/// Decode a line-oriented text response.
///
/// Line 0 must be `OK`; anything else is surfaced as a protocol error
/// carrying the offending line and the request URL.
fn parse_text(response: reqwest::blocking::Response) -> Result<Vec<String>> {
    let url = response.url().to_string();
    let body = response.text()?;

    if body.is_empty() {
        return Err(Error::EmptyResponse { url });
    }

    let mut lines = body.split('\n');
    match lines.next() {
        Some("OK") => Ok(lines.map(str::to_owned).collect()),
        Some(line) => Err(Error::Protocol {
            url,
            line: line.to_owned(),
        }),
        None => Err(Error::EmptyResponse { url }),
    }
}
