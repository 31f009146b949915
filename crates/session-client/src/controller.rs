//! `SessionController` - actor owning the lifecycle of one session attempt.
//!
//! The controller task is the only place session state changes. It
//! multiplexes three sources with `tokio::select!`:
//!
//! - operator commands from [`SessionControllerHandle`]
//! - the pending join (token fetch followed by the SDK join)
//! - the active session's event stream
//!
//! so view updates happen in the order the SDK delivered the events.
//!
//! ```text
//! Idle --connect--> Connecting --joined--> Connected
//!  ^                  |    |                   |
//!  |      failure     |    | disconnect        | disconnect / remote end
//!  +------------------+    v                   v
//!  +-------------------- Disconnecting <-------+
//! ```

use crate::errors::ClientError;
use crate::events::SessionEvent;
use crate::participants::ParticipantRegistry;
use crate::pointer::PointerMessage;
use crate::sdk::{ConnectOptions, JoinedSession, LocalTracks, SessionHandle, VideoSdk};
use crate::state::SessionState;
use crate::token_client::TokenSource;
use crate::view::SessionView;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// Default channel buffer size for the controller mailbox.
const CONTROLLER_CHANNEL_BUFFER: usize = 32;

/// Capture local media and the data track, and show the media in the
/// local preview.
///
/// Runs once, before any session is joined.
pub async fn prepare_local_tracks(
    sdk: &dyn VideoSdk,
    view: &mut dyn SessionView,
) -> Result<LocalTracks, ClientError> {
    let media = sdk.create_local_tracks().await.map_err(|e| {
        error!(target: "session.local", error = %e, "Failed to capture local media");
        ClientError::LocalMedia(e.to_string())
    })?;

    for track in &media {
        view.attach_local_track(track);
    }

    let data = sdk.create_local_data_track().await.map_err(|e| {
        error!(target: "session.local", error = %e, "Failed to create local data track");
        ClientError::LocalMedia(e.to_string())
    })?;

    info!(
        target: "session.local",
        media_tracks = media.len(),
        data_track = data.name(),
        "Local tracks ready"
    );

    Ok(LocalTracks { media, data })
}

/// Messages sent to the `SessionController`.
#[derive(Debug)]
pub enum ControllerMessage {
    /// Join `name` as `identity`. Answered when the join resolves.
    Connect {
        identity: String,
        name: String,
        respond_to: oneshot::Sender<Result<(), ClientError>>,
    },

    /// Leave the session, or abandon a pending join. Answered once idle.
    Disconnect { respond_to: oneshot::Sender<()> },
}

/// Handle to the `SessionController`.
#[derive(Clone)]
pub struct SessionControllerHandle {
    sender: mpsc::Sender<ControllerMessage>,
    state: watch::Receiver<SessionState>,
    cancel_token: CancellationToken,
}

impl SessionControllerHandle {
    /// Request a session join and wait for the outcome.
    pub async fn connect(
        &self,
        identity: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<(), ClientError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(ControllerMessage::Connect {
                identity: identity.into(),
                name: name.into(),
                respond_to: tx,
            })
            .await
            .map_err(|_| ClientError::ControllerGone)?;

        rx.await.map_err(|_| ClientError::ControllerGone)?
    }

    /// Leave the current session, cancelling a pending join if there is one.
    ///
    /// Returns once the controller is idle again.
    pub async fn disconnect(&self) -> Result<(), ClientError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(ControllerMessage::Disconnect { respond_to: tx })
            .await
            .map_err(|_| ClientError::ControllerGone)?;

        rx.await.map_err(|_| ClientError::ControllerGone)
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Watch state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    /// Stop the controller, leaving any session first.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

/// A join in flight.
struct PendingJoin {
    future: BoxFuture<'static, Result<JoinedSession, ClientError>>,
    cancel: CancellationToken,
    respond_to: oneshot::Sender<Result<(), ClientError>>,
}

struct ActiveSession {
    handle: Box<dyn SessionHandle>,
    events: mpsc::Receiver<SessionEvent>,
}

/// The session controller actor.
pub struct SessionController {
    sdk: Arc<dyn VideoSdk>,
    tokens: Arc<dyn TokenSource>,
    view: Box<dyn SessionView>,
    local_tracks: LocalTracks,
    sdk_log_level: String,
    receiver: mpsc::Receiver<ControllerMessage>,
    cancel_token: CancellationToken,
    state_tx: watch::Sender<SessionState>,
    pending: Option<PendingJoin>,
    active: Option<ActiveSession>,
    participants: ParticipantRegistry,
}

impl SessionController {
    /// Spawn the controller task and return a handle to it.
    ///
    /// The view is rendered in the `Idle` state before this returns.
    pub fn spawn(
        sdk: Arc<dyn VideoSdk>,
        tokens: Arc<dyn TokenSource>,
        mut view: Box<dyn SessionView>,
        local_tracks: LocalTracks,
        sdk_log_level: impl Into<String>,
    ) -> (SessionControllerHandle, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(CONTROLLER_CHANNEL_BUFFER);
        let (state_tx, state_rx) = watch::channel(SessionState::Idle);
        let cancel_token = CancellationToken::new();

        view.render_controls(SessionState::Idle, &SessionState::Idle.controls());

        let actor = Self {
            sdk,
            tokens,
            view,
            local_tracks,
            sdk_log_level: sdk_log_level.into(),
            receiver,
            cancel_token: cancel_token.clone(),
            state_tx,
            pending: None,
            active: None,
            participants: ParticipantRegistry::new(),
        };

        let task = tokio::spawn(actor.run());

        (
            SessionControllerHandle {
                sender,
                state: state_rx,
                cancel_token,
            },
            task,
        )
    }

    #[instrument(skip_all, name = "session.controller")]
    async fn run(mut self) {
        info!(target: "session.controller", "SessionController started");

        loop {
            tokio::select! {
                () = self.cancel_token.cancelled() => {
                    info!(target: "session.controller", "SessionController received cancellation signal");
                    self.disconnect().await;
                    break;
                }

                message = self.receiver.recv() => {
                    if let Some(message) = message {
                        self.handle_message(message).await;
                    } else {
                        debug!(target: "session.controller", "All handles dropped");
                        self.disconnect().await;
                        break;
                    }
                }

                result = next_join_result(&mut self.pending), if self.pending.is_some() => {
                    self.finish_join(result);
                }

                event = next_event(&mut self.active), if self.active.is_some() => {
                    match event {
                        Some(event) => self.handle_event(event),
                        None => {
                            warn!(target: "session.controller", "Session event stream closed");
                            self.session_ended(None);
                        }
                    }
                }
            }
        }

        info!(target: "session.controller", "SessionController stopped");
    }

    fn state(&self) -> SessionState {
        *self.state_tx.borrow()
    }

    fn set_state(&mut self, state: SessionState) {
        let previous = self.state_tx.send_replace(state);
        if previous != state {
            debug!(
                target: "session.controller",
                from = %previous,
                to = %state,
                "Session state changed"
            );
        }
        self.view.render_controls(state, &state.controls());
    }

    async fn handle_message(&mut self, message: ControllerMessage) {
        match message {
            ControllerMessage::Connect {
                identity,
                name,
                respond_to,
            } => self.start_join(identity, name, respond_to),
            ControllerMessage::Disconnect { respond_to } => {
                self.disconnect().await;
                let _ = respond_to.send(());
            }
        }
    }

    fn start_join(
        &mut self,
        identity: String,
        name: String,
        respond_to: oneshot::Sender<Result<(), ClientError>>,
    ) {
        let state = self.state();
        if state != SessionState::Idle {
            warn!(target: "session.controller", state = %state, "Connect requested while not idle");
            let _ = respond_to.send(Err(ClientError::AlreadyActive(state)));
            return;
        }

        self.set_state(SessionState::Connecting);
        info!(target: "session.controller", session = %name, "Joining session");

        let cancel = self.cancel_token.child_token();
        let options = ConnectOptions {
            name,
            log_level: self.sdk_log_level.clone(),
            tracks: self.local_tracks.clone(),
            cancel: cancel.clone(),
        };
        let sdk = Arc::clone(&self.sdk);
        let tokens = Arc::clone(&self.tokens);
        let guard = cancel.clone();

        let join = async move {
            let token = tokens.fetch_token(&identity).await?;
            sdk.connect(&token, options)
                .await
                .map_err(|e| ClientError::SessionJoin(e.to_string()))
        };

        let future = async move {
            tokio::select! {
                biased;
                () = guard.cancelled() => Err(ClientError::Cancelled),
                result = join => result,
            }
        }
        .boxed();

        self.pending = Some(PendingJoin {
            future,
            cancel,
            respond_to,
        });
    }

    fn finish_join(&mut self, result: Result<JoinedSession, ClientError>) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        match result {
            Ok(joined) => {
                info!(
                    target: "session.controller",
                    session_sid = joined.session.sid(),
                    participants = joined.participants.len(),
                    "Joined session"
                );

                self.active = Some(ActiveSession {
                    handle: joined.session,
                    events: joined.events,
                });
                self.set_state(SessionState::Connected);

                for participant in &joined.participants {
                    self.participants
                        .participant_connected(self.view.as_mut(), participant);
                }

                let _ = pending.respond_to.send(Ok(()));
            }
            Err(e) => {
                error!(target: "session.controller", error = %e, "Failed to join session");
                self.set_state(SessionState::Idle);
                let _ = pending.respond_to.send(Err(e));
            }
        }
    }

    fn handle_event(&mut self, event: SessionEvent) {
        debug!(target: "session.controller", event = event.name(), "Session event");
        let view = self.view.as_mut();

        match event {
            SessionEvent::ParticipantConnected(participant) => {
                info!(
                    target: "session.controller",
                    participant = %participant.sid,
                    "Participant connected"
                );
                self.participants.participant_connected(view, &participant);
            }
            SessionEvent::ParticipantDisconnected(participant) => {
                info!(
                    target: "session.controller",
                    participant = %participant,
                    "Participant disconnected"
                );
                self.participants
                    .participant_disconnected(view, &participant);
            }
            SessionEvent::TrackAdded { participant, track } => {
                self.participants.track_added(view, &participant, &track);
            }
            SessionEvent::TrackRemoved { participant, track } => {
                self.participants
                    .track_removed(view, &participant, &track.sid);
            }
            SessionEvent::TrackMessage {
                participant,
                track,
                data,
            } => {
                if !self.participants.is_data_track(&participant, &track) {
                    return;
                }
                match PointerMessage::from_json(&data) {
                    Ok(message) => view.draw_pointer(&participant, &message),
                    Err(e) => {
                        debug!(
                            target: "session.controller",
                            participant = %participant,
                            error = %e,
                            "Skipping malformed pointer message"
                        );
                    }
                }
            }
            SessionEvent::Disconnected { reason } => {
                self.session_ended(reason);
            }
        }
    }

    /// The session ended remotely.
    fn session_ended(&mut self, reason: Option<String>) {
        warn!(
            target: "session.controller",
            reason = reason.as_deref().unwrap_or("none"),
            "Session ended remotely"
        );
        self.set_state(SessionState::Disconnecting);
        self.active = None;
        self.did_disconnect();
    }

    /// Operator-initiated disconnect from any state.
    async fn disconnect(&mut self) {
        match self.state() {
            SessionState::Idle | SessionState::Disconnecting => {}
            SessionState::Connecting => {
                self.set_state(SessionState::Disconnecting);
                if let Some(pending) = self.pending.take() {
                    info!(target: "session.controller", "Cancelling pending join");
                    pending.cancel.cancel();
                    let _ = pending.respond_to.send(Err(ClientError::Cancelled));
                }
                self.did_disconnect();
            }
            SessionState::Connected => {
                self.set_state(SessionState::Disconnecting);
                if let Some(active) = self.active.take() {
                    info!(
                        target: "session.controller",
                        session_sid = active.handle.sid(),
                        "Leaving session"
                    );
                    active.handle.disconnect().await;
                }
                self.did_disconnect();
            }
        }
    }

    fn did_disconnect(&mut self) {
        self.participants.clear(self.view.as_mut());
        self.set_state(SessionState::Idle);
    }
}

async fn next_join_result(
    pending: &mut Option<PendingJoin>,
) -> Result<JoinedSession, ClientError> {
    match pending {
        Some(pending) => (&mut pending.future).await,
        None => future::pending().await,
    }
}

async fn next_event(active: &mut Option<ActiveSession>) -> Option<SessionEvent> {
    match active {
        Some(active) => active.events.recv().await,
        None => future::pending().await,
    }
}
