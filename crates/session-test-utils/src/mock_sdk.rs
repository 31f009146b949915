//! Mock video SDK for session client testing.
//!
//! Can be configured to:
//! - Accept joins immediately, or hold them until released
//! - Reject joins or local media capture
//! - Report participants already present at join time
//!
//! # Example
//!
//! ```rust,ignore
//! use session_test_utils::MockSdk;
//!
//! let sdk = MockSdk::builder()
//!     .with_participant(TestParticipant::new("PA1").build())
//!     .gated_join()
//!     .build();
//!
//! // ... start a connect, then:
//! sdk.release_join();
//! sdk.send_event(TestParticipant::new("PA2").connected()).await;
//! ```

use async_trait::async_trait;
use common::error::{DemoError, Result as DemoResult};
use common::types::TrackKind;
use session_client::sdk::{
    ConnectOptions, JoinedSession, LocalDataTrack, LocalMediaTrack, RemoteParticipant,
    SdkError, SessionHandle, VideoSdk,
};
use session_client::SessionEvent;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, Notify};
use tokio_util::sync::CancellationToken;

/// Buffer of the mock session's event channel.
const EVENT_BUFFER: usize = 64;

/// One recorded `connect` call.
#[derive(Debug, Clone)]
pub struct ConnectCall {
    pub token: String,
    pub name: String,
    pub log_level: String,
    pub media_tracks: usize,
    pub data_track: String,
    /// The join's cancellation token, as handed to the SDK.
    pub cancel: CancellationToken,
}

/// Local data track that records what was sent.
#[derive(Debug, Default)]
pub struct MockDataTrack {
    sent: Mutex<Vec<String>>,
    closed: bool,
}

impl MockDataTrack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A track whose sends fail.
    #[must_use]
    pub fn closed() -> Self {
        Self {
            sent: Mutex::default(),
            closed: true,
        }
    }

    #[must_use]
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl LocalDataTrack for MockDataTrack {
    fn name(&self) -> &str {
        "pointer"
    }

    fn send(&self, data: &str) -> DemoResult<()> {
        if self.closed {
            return Err(DemoError::Transport("data track closed".to_string()));
        }
        self.sent.lock().unwrap().push(data.to_string());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MockSdkState {
    connect_calls: Vec<ConnectCall>,
    events: Option<mpsc::Sender<SessionEvent>>,
}

/// Mock SDK. Clones share state.
#[derive(Clone)]
pub struct MockSdk {
    participants: Vec<RemoteParticipant>,
    join_error: Option<String>,
    media_error: Option<String>,
    gated: bool,
    gate: Arc<Notify>,
    data_track: Arc<MockDataTrack>,
    state: Arc<Mutex<MockSdkState>>,
    session_disconnects: Arc<AtomicUsize>,
}

impl MockSdk {
    /// Create a new MockSdk builder.
    #[must_use]
    pub fn builder() -> MockSdkBuilder {
        MockSdkBuilder::default()
    }

    /// A MockSdk that accepts every join into an empty session.
    #[must_use]
    pub fn accepting() -> Self {
        Self::builder().build()
    }

    /// Let a gated join complete.
    pub fn release_join(&self) {
        self.gate.notify_one();
    }

    #[must_use]
    pub fn connect_calls(&self) -> Vec<ConnectCall> {
        self.state.lock().unwrap().connect_calls.clone()
    }

    /// Number of times a session handle was told to disconnect.
    #[must_use]
    pub fn session_disconnects(&self) -> usize {
        self.session_disconnects.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn data_track(&self) -> Arc<MockDataTrack> {
        Arc::clone(&self.data_track)
    }

    /// Deliver an event on the most recent session.
    ///
    /// # Panics
    ///
    /// Panics if no session was joined or the controller dropped it.
    pub async fn send_event(&self, event: SessionEvent) {
        let sender = self
            .state
            .lock()
            .unwrap()
            .events
            .clone()
            .expect("no session has been joined");
        sender
            .send(event)
            .await
            .expect("session event receiver dropped");
    }

    /// Close the most recent session's event channel, as a transport loss would.
    pub fn drop_session(&self) {
        self.state.lock().unwrap().events = None;
    }
}

#[async_trait]
impl VideoSdk for MockSdk {
    async fn create_local_tracks(&self) -> Result<Vec<LocalMediaTrack>, SdkError> {
        if let Some(error) = &self.media_error {
            return Err(SdkError(error.clone()));
        }
        Ok(vec![
            LocalMediaTrack {
                kind: TrackKind::Audio,
                name: "microphone".to_string(),
            },
            LocalMediaTrack {
                kind: TrackKind::Video,
                name: "camera".to_string(),
            },
        ])
    }

    async fn create_local_data_track(&self) -> Result<Arc<dyn LocalDataTrack>, SdkError> {
        let track: Arc<dyn LocalDataTrack> = self.data_track.clone();
        Ok(track)
    }

    async fn connect(
        &self,
        token: &str,
        options: ConnectOptions,
    ) -> Result<JoinedSession, SdkError> {
        self.state.lock().unwrap().connect_calls.push(ConnectCall {
            token: token.to_string(),
            name: options.name.clone(),
            log_level: options.log_level.clone(),
            media_tracks: options.tracks.media.len(),
            data_track: options.tracks.data.name().to_string(),
            cancel: options.cancel.clone(),
        });

        if self.gated {
            tokio::select! {
                () = self.gate.notified() => {}
                () = options.cancel.cancelled() => {
                    return Err(SdkError("join cancelled".to_string()));
                }
            }
        }

        if let Some(error) = &self.join_error {
            return Err(SdkError(error.clone()));
        }

        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        self.state.lock().unwrap().events = Some(tx);

        Ok(JoinedSession {
            session: Box::new(MockSessionHandle {
                sid: format!("RM-{}", options.name),
                disconnects: Arc::clone(&self.session_disconnects),
            }),
            participants: self.participants.clone(),
            events: rx,
        })
    }
}

struct MockSessionHandle {
    sid: String,
    disconnects: Arc<AtomicUsize>,
}

#[async_trait]
impl SessionHandle for MockSessionHandle {
    fn sid(&self) -> &str {
        &self.sid
    }

    async fn disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
    }
}

/// Builder for MockSdk configuration.
#[derive(Default)]
pub struct MockSdkBuilder {
    participants: Vec<RemoteParticipant>,
    join_error: Option<String>,
    media_error: Option<String>,
    gated: bool,
    closed_data_track: bool,
}

impl MockSdkBuilder {
    /// Report this participant as already present at join time.
    #[must_use]
    pub fn with_participant(mut self, participant: RemoteParticipant) -> Self {
        self.participants.push(participant);
        self
    }

    /// Reject every join with the given message.
    #[must_use]
    pub fn failing_join(mut self, message: impl Into<String>) -> Self {
        self.join_error = Some(message.into());
        self
    }

    /// Fail local media capture.
    #[must_use]
    pub fn failing_local_media(mut self, message: impl Into<String>) -> Self {
        self.media_error = Some(message.into());
        self
    }

    /// Hold joins until `MockSdk::release_join` or cancellation.
    #[must_use]
    pub fn gated_join(mut self) -> Self {
        self.gated = true;
        self
    }

    #[must_use]
    pub fn with_closed_data_track(mut self) -> Self {
        self.closed_data_track = true;
        self
    }

    /// Build the MockSdk.
    #[must_use]
    pub fn build(self) -> MockSdk {
        let data_track = if self.closed_data_track {
            MockDataTrack::closed()
        } else {
            MockDataTrack::new()
        };

        MockSdk {
            participants: self.participants,
            join_error: self.join_error,
            media_error: self.media_error,
            gated: self.gated,
            gate: Arc::new(Notify::new()),
            data_track: Arc::new(data_track),
            state: Arc::new(Mutex::new(MockSdkState::default())),
            session_disconnects: Arc::new(AtomicUsize::new(0)),
        }
    }
}
