//! Pre-configured participants and tracks.

use common::types::{ParticipantSid, TrackKind, TrackSid};
use session_client::sdk::{RemoteParticipant, RemoteTrack};
use session_client::SessionEvent;

pub fn audio_track(sid: &str) -> RemoteTrack {
    remote_track(sid, TrackKind::Audio)
}

pub fn video_track(sid: &str) -> RemoteTrack {
    remote_track(sid, TrackKind::Video)
}

pub fn data_track(sid: &str) -> RemoteTrack {
    remote_track(sid, TrackKind::Data)
}

pub fn remote_track(sid: &str, kind: TrackKind) -> RemoteTrack {
    RemoteTrack {
        sid: TrackSid::from(sid),
        kind,
        name: format!("{kind}-{sid}"),
    }
}

/// Test participant fixture.
#[derive(Debug, Clone)]
pub struct TestParticipant {
    sid: String,
    identity: String,
    tracks: Vec<RemoteTrack>,
}

impl TestParticipant {
    /// Participant with the given sid and an identity derived from it.
    #[must_use]
    pub fn new(sid: impl Into<String>) -> Self {
        let sid = sid.into();
        Self {
            identity: format!("user-{sid}"),
            sid,
            tracks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = identity.into();
        self
    }

    #[must_use]
    pub fn with_track(mut self, track: RemoteTrack) -> Self {
        self.tracks.push(track);
        self
    }

    /// Audio, video and data tracks with sids derived from the participant.
    #[must_use]
    pub fn with_default_tracks(self) -> Self {
        let sid = self.sid.clone();
        self.with_track(audio_track(&format!("{sid}-audio")))
            .with_track(video_track(&format!("{sid}-video")))
            .with_track(data_track(&format!("{sid}-data")))
    }

    #[must_use]
    pub fn sid(&self) -> ParticipantSid {
        ParticipantSid::new(self.sid.clone())
    }

    #[must_use]
    pub fn build(&self) -> RemoteParticipant {
        RemoteParticipant {
            sid: self.sid(),
            identity: self.identity.clone(),
            tracks: self.tracks.clone(),
        }
    }

    #[must_use]
    pub fn connected(&self) -> SessionEvent {
        SessionEvent::ParticipantConnected(self.build())
    }

    #[must_use]
    pub fn disconnected(&self) -> SessionEvent {
        SessionEvent::ParticipantDisconnected(self.sid())
    }

    #[must_use]
    pub fn track_added(&self, track: RemoteTrack) -> SessionEvent {
        SessionEvent::TrackAdded {
            participant: self.sid(),
            track,
        }
    }

    #[must_use]
    pub fn track_removed(&self, track: RemoteTrack) -> SessionEvent {
        SessionEvent::TrackRemoved {
            participant: self.sid(),
            track,
        }
    }

    #[must_use]
    pub fn message(&self, track_sid: &str, data: impl Into<String>) -> SessionEvent {
        SessionEvent::TrackMessage {
            participant: self.sid(),
            track: TrackSid::from(track_sid),
            data: data.into(),
        }
    }
}
