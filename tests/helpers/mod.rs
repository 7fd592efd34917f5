// ABOUTME: Shared helpers for integration tests
// ABOUTME: Bridges the blocking client into tokio tests and builds mock-server configs
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::expect_used)]

use endomondo_client::{DeviceIdentity, ProtocolConfig};
use wiremock::MockServer;

/// Run a blocking client operation off the async test runtime.
pub async fn call_blocking<T, F>(operation: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(operation)
        .await
        .expect("blocking task panicked")
}

/// Protocol config pointed at a mock server instead of the real API base.
pub fn test_config(server: &MockServer) -> ProtocolConfig {
    ProtocolConfig {
        base_url: server.uri(),
        identity: DeviceIdentity {
            device_id: "test-device".to_owned(),
            ..DeviceIdentity::default()
        },
    }
}
