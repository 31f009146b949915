//! `SessionView` that records what was rendered.

use common::types::{ParticipantSid, TrackSid};
use session_client::pointer::PointerMessage;
use session_client::sdk::{LocalMediaTrack, RemoteTrack};
use session_client::view::SessionView;
use session_client::{ControlState, SessionState};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct ViewLog {
    elements: BTreeMap<ParticipantSid, String>,
    attachments: BTreeMap<ParticipantSid, Vec<TrackSid>>,
    attach_calls: usize,
    controls: Vec<ControlState>,
    states: Vec<SessionState>,
    local_tracks: Vec<LocalMediaTrack>,
    pointers: Vec<(ParticipantSid, PointerMessage)>,
    violations: Vec<String>,
}

/// Recording view. Clones share one log, so a test can keep a clone while
/// the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    log: Arc<Mutex<ViewLog>>,
}

impl RecordingView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Participant element keys, sorted.
    #[must_use]
    pub fn elements(&self) -> Vec<String> {
        let log = self.log.lock().unwrap();
        log.elements.keys().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn identity_of(&self, participant: &str) -> Option<String> {
        let log = self.log.lock().unwrap();
        log.elements.get(&ParticipantSid::from(participant)).cloned()
    }

    /// Media tracks currently attached to a participant's element.
    #[must_use]
    pub fn attachments(&self, participant: &str) -> Vec<String> {
        let log = self.log.lock().unwrap();
        log.attachments
            .get(&ParticipantSid::from(participant))
            .map(|tracks| tracks.iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    /// Total `attach_track` calls over the view's lifetime.
    #[must_use]
    pub fn attach_calls(&self) -> usize {
        self.log.lock().unwrap().attach_calls
    }

    #[must_use]
    pub fn controls_history(&self) -> Vec<ControlState> {
        self.log.lock().unwrap().controls.clone()
    }

    /// Every state the controller rendered, in order.
    #[must_use]
    pub fn state_history(&self) -> Vec<SessionState> {
        self.log.lock().unwrap().states.clone()
    }

    #[must_use]
    pub fn last_controls(&self) -> Option<ControlState> {
        self.log.lock().unwrap().controls.last().copied()
    }

    #[must_use]
    pub fn local_tracks(&self) -> Vec<LocalMediaTrack> {
        self.log.lock().unwrap().local_tracks.clone()
    }

    #[must_use]
    pub fn pointers(&self) -> Vec<(String, PointerMessage)> {
        let log = self.log.lock().unwrap();
        log.pointers
            .iter()
            .map(|(sid, message)| (sid.to_string(), *message))
            .collect()
    }

    /// Panic if the view was ever driven inconsistently: duplicate elements,
    /// attachments without an element, or elements removed while tracks
    /// were still attached.
    pub fn assert_consistent(&self) {
        let log = self.log.lock().unwrap();
        assert!(
            log.violations.is_empty(),
            "View was driven inconsistently: {:?}",
            log.violations
        );
    }
}

impl SessionView for RecordingView {
    fn render_controls(&mut self, state: SessionState, controls: &ControlState) {
        let mut log = self.log.lock().unwrap();
        log.states.push(state);
        log.controls.push(*controls);
    }

    fn attach_local_track(&mut self, track: &LocalMediaTrack) {
        self.log.lock().unwrap().local_tracks.push(track.clone());
    }

    fn create_participant(&mut self, participant: &ParticipantSid, identity: &str) {
        let mut log = self.log.lock().unwrap();
        if log.elements.contains_key(participant) {
            log.violations
                .push(format!("element for {participant} created twice"));
        }
        log.elements.insert(participant.clone(), identity.to_string());
    }

    fn remove_participant(&mut self, participant: &ParticipantSid) {
        let mut log = self.log.lock().unwrap();
        let attached = log.attachments.remove(participant).unwrap_or_default();
        if !attached.is_empty() {
            log.violations.push(format!(
                "element for {participant} removed with tracks still attached: {attached:?}"
            ));
        }
        log.elements.remove(participant);
    }

    fn attach_track(&mut self, participant: &ParticipantSid, track: &RemoteTrack) {
        let mut log = self.log.lock().unwrap();
        if !log.elements.contains_key(participant) {
            log.violations.push(format!(
                "track {} attached to missing element {participant}",
                track.sid
            ));
        }
        log.attach_calls += 1;
        log.attachments
            .entry(participant.clone())
            .or_default()
            .push(track.sid.clone());
    }

    fn detach_track(&mut self, participant: &ParticipantSid, track: &RemoteTrack) {
        let mut log = self.log.lock().unwrap();
        if let Some(tracks) = log.attachments.get_mut(participant) {
            tracks.retain(|sid| sid != &track.sid);
        }
    }

    fn draw_pointer(&mut self, participant: &ParticipantSid, message: &PointerMessage) {
        self.log
            .lock()
            .unwrap()
            .pointers
            .push((participant.clone(), *message));
    }
}
