//! # Session Test Utilities
//!
//! Mocks and fixtures for testing the session client without a real video
//! SDK or token server.
//!
//! - `mock_sdk` - Scriptable `VideoSdk` with a controllable event stream
//! - `mock_token_source` - Canned `TokenSource`
//! - `recording_view` - `SessionView` that records what was rendered
//! - `fixtures` - Participants, tracks and the events they produce
//!
//! ## Usage
//!
//! ```rust,ignore
//! use session_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() {
//!     let sdk = MockSdk::accepting();
//!     let view = RecordingView::new();
//!     let (handle, _task) = spawn_controller(&sdk, MockTokenSource::returning("token"), &view).await;
//!
//!     handle.connect("alice", "demo").await.unwrap();
//!     sdk.send_event(TestParticipant::new("PA1").connected()).await;
//! }
//! ```

pub mod fixtures;
pub mod mock_sdk;
pub mod mock_token_source;
pub mod recording_view;

// Re-export commonly used items
pub use fixtures::*;
pub use mock_sdk::*;
pub use mock_token_source::*;
pub use recording_view::*;

use session_client::{prepare_local_tracks, SessionController, SessionControllerHandle};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Prepare local tracks and spawn a controller over the given mocks.
///
/// # Panics
///
/// Panics if local track preparation fails.
pub async fn spawn_controller(
    sdk: &MockSdk,
    tokens: impl session_client::token_client::TokenSource + 'static,
    view: &RecordingView,
) -> (SessionControllerHandle, JoinHandle<()>) {
    let mut preview = view.clone();
    let local_tracks = prepare_local_tracks(sdk, &mut preview)
        .await
        .expect("local tracks should be available");

    SessionController::spawn(
        Arc::new(sdk.clone()),
        Arc::new(tokens),
        Box::new(view.clone()),
        local_tracks,
        "debug",
    )
}

/// Wait until `condition` holds, polling every 5ms for up to 2s.
///
/// # Panics
///
/// Panics when the deadline passes.
pub async fn wait_until(description: &str, mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "Timed out waiting for: {description}"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Wait for the controller to report `state`.
///
/// # Panics
///
/// Panics after 2s, or if the controller stops.
pub async fn wait_for_state(
    states: &mut watch::Receiver<session_client::SessionState>,
    state: session_client::SessionState,
) {
    tokio::time::timeout(Duration::from_secs(2), states.wait_for(|s| *s == state))
        .await
        .unwrap_or_else(|_| panic!("Timed out waiting for state {state}"))
        .expect("controller stopped");
}
