//! Remote participants and their tracks as currently rendered.
//!
//! Invariants:
//! - at most one element per participant sid
//! - at most one attachment per (participant, track) pair
//! - a participant's media tracks are detached before its element is removed

use crate::sdk::{RemoteParticipant, RemoteTrack};
use crate::view::SessionView;
use common::types::{ParticipantSid, TrackKind, TrackSid};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug)]
struct ParticipantEntry {
    identity: String,
    tracks: BTreeMap<TrackSid, RemoteTrack>,
}

#[derive(Debug, Default)]
pub struct ParticipantRegistry {
    participants: BTreeMap<ParticipantSid, ParticipantEntry>,
}

impl ParticipantRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the participant's element and attach the tracks it already
    /// publishes. Returns `false` if the participant was already known.
    pub fn participant_connected(
        &mut self,
        view: &mut dyn SessionView,
        participant: &RemoteParticipant,
    ) -> bool {
        if self.participants.contains_key(&participant.sid) {
            debug!(
                target: "session.participants",
                participant = %participant.sid,
                "Participant already rendered"
            );
            return false;
        }

        view.create_participant(&participant.sid, &participant.identity);
        self.participants.insert(
            participant.sid.clone(),
            ParticipantEntry {
                identity: participant.identity.clone(),
                tracks: BTreeMap::new(),
            },
        );

        for track in &participant.tracks {
            self.track_added(view, &participant.sid, track);
        }
        true
    }

    /// Detach the participant's tracks and remove its element. Returns
    /// `false` if the participant was unknown.
    pub fn participant_disconnected(
        &mut self,
        view: &mut dyn SessionView,
        participant: &ParticipantSid,
    ) -> bool {
        let Some(entry) = self.participants.remove(participant) else {
            return false;
        };

        for track in entry.tracks.values().filter(|t| t.kind.is_media()) {
            view.detach_track(participant, track);
        }
        view.remove_participant(participant);
        true
    }

    /// Record a subscribed track; media tracks are attached to the element.
    /// Returns `false` for unknown participants and already-known tracks.
    pub fn track_added(
        &mut self,
        view: &mut dyn SessionView,
        participant: &ParticipantSid,
        track: &RemoteTrack,
    ) -> bool {
        let Some(entry) = self.participants.get_mut(participant) else {
            debug!(
                target: "session.participants",
                participant = %participant,
                track = %track.sid,
                "Track added for unknown participant"
            );
            return false;
        };
        if entry.tracks.contains_key(&track.sid) {
            return false;
        }

        if track.kind.is_media() {
            view.attach_track(participant, track);
        }
        entry.tracks.insert(track.sid.clone(), track.clone());
        true
    }

    /// Forget a track; media tracks are detached. Returns `false` if the
    /// track was not known.
    pub fn track_removed(
        &mut self,
        view: &mut dyn SessionView,
        participant: &ParticipantSid,
        track: &TrackSid,
    ) -> bool {
        let Some(removed) = self
            .participants
            .get_mut(participant)
            .and_then(|entry| entry.tracks.remove(track))
        else {
            return false;
        };

        if removed.kind.is_media() {
            view.detach_track(participant, &removed);
        }
        true
    }

    /// Whether messages on this track should be consumed.
    #[must_use]
    pub fn is_data_track(&self, participant: &ParticipantSid, track: &TrackSid) -> bool {
        self.participants
            .get(participant)
            .and_then(|entry| entry.tracks.get(track))
            .is_some_and(|t| t.kind == TrackKind::Data)
    }

    /// Tear down every participant.
    pub fn clear(&mut self, view: &mut dyn SessionView) {
        let sids: Vec<ParticipantSid> = self.participants.keys().cloned().collect();
        for sid in sids {
            self.participant_disconnected(view, &sid);
        }
    }

    #[must_use]
    pub fn contains(&self, participant: &ParticipantSid) -> bool {
        self.participants.contains_key(participant)
    }

    #[must_use]
    pub fn identity(&self, participant: &ParticipantSid) -> Option<&str> {
        self.participants
            .get(participant)
            .map(|entry| entry.identity.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
