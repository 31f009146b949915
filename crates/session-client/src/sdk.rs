//! Boundary to the real-time video SDK.
//!
//! The host application implements these traits over its SDK. The session
//! controller only ever talks to the SDK through them.

use crate::events::SessionEvent;
use async_trait::async_trait;
use common::types::{ParticipantSid, TrackKind, TrackSid};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Failure reported by the SDK.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SdkError(pub String);

/// A locally captured audio or video track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalMediaTrack {
    pub kind: TrackKind,
    pub name: String,
}

/// Local data track used to publish pointer messages.
pub trait LocalDataTrack: Send + Sync {
    fn name(&self) -> &str;

    /// Publish one message to every subscriber.
    fn send(&self, data: &str) -> common::error::Result<()>;
}

/// Everything published when joining a session.
#[derive(Clone)]
pub struct LocalTracks {
    pub media: Vec<LocalMediaTrack>,
    pub data: Arc<dyn LocalDataTrack>,
}

impl fmt::Debug for LocalTracks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalTracks")
            .field("media", &self.media)
            .field("data", &self.data.name())
            .finish()
    }
}

/// A track published by a remote participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTrack {
    pub sid: TrackSid,
    pub kind: TrackKind,
    pub name: String,
}

/// A remote participant and the tracks it has published so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteParticipant {
    pub sid: ParticipantSid,
    pub identity: String,
    pub tracks: Vec<RemoteTrack>,
}

/// Options for a join request.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Session name to join (created on first join).
    pub name: String,
    pub log_level: String,
    pub tracks: LocalTracks,
    /// Cancelled when the operator abandons the join.
    pub cancel: CancellationToken,
}

/// An active session.
#[async_trait]
pub trait SessionHandle: Send + Sync {
    fn sid(&self) -> &str;

    /// Leave the session.
    async fn disconnect(&self);
}

/// Result of a successful join.
pub struct JoinedSession {
    pub session: Box<dyn SessionHandle>,
    /// Participants already present when the join completed.
    pub participants: Vec<RemoteParticipant>,
    /// Session events in delivery order. Closing the channel ends the session.
    pub events: mpsc::Receiver<SessionEvent>,
}

impl fmt::Debug for JoinedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinedSession")
            .field("session", &self.session.sid())
            .field("participants", &self.participants)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait VideoSdk: Send + Sync {
    /// Capture the local camera and microphone.
    async fn create_local_tracks(&self) -> Result<Vec<LocalMediaTrack>, SdkError>;

    async fn create_local_data_track(&self) -> Result<Arc<dyn LocalDataTrack>, SdkError>;

    /// Join a session with an access token.
    async fn connect(&self, token: &str, options: ConnectOptions)
        -> Result<JoinedSession, SdkError>;
}
