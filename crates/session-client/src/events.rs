//! Typed session events delivered by the SDK.

use crate::sdk::{RemoteParticipant, RemoteTrack};
use common::types::{ParticipantSid, TrackSid};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    ParticipantConnected(RemoteParticipant),
    ParticipantDisconnected(ParticipantSid),
    TrackAdded {
        participant: ParticipantSid,
        track: RemoteTrack,
    },
    TrackRemoved {
        participant: ParticipantSid,
        track: RemoteTrack,
    },
    /// One message received on a remote data track.
    TrackMessage {
        participant: ParticipantSid,
        track: TrackSid,
        data: String,
    },
    /// The session ended without the operator asking for it.
    Disconnected { reason: Option<String> },
}

impl SessionEvent {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ParticipantConnected(_) => "participant_connected",
            Self::ParticipantDisconnected(_) => "participant_disconnected",
            Self::TrackAdded { .. } => "track_added",
            Self::TrackRemoved { .. } => "track_removed",
            Self::TrackMessage { .. } => "track_message",
            Self::Disconnected { .. } => "disconnected",
        }
    }
}
