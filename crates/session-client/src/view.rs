//! Rendering boundary.
//!
//! The controller drives a `SessionView`; the host application decides what
//! a "participant element" or an "attachment" actually is.

use crate::pointer::PointerMessage;
use crate::sdk::{LocalMediaTrack, RemoteTrack};
use crate::state::{ControlState, SessionState};
use common::types::ParticipantSid;

pub trait SessionView: Send {
    /// Show the session state and enable or disable the operator inputs.
    fn render_controls(&mut self, state: SessionState, controls: &ControlState);

    /// Show a local track in the preview area.
    fn attach_local_track(&mut self, track: &LocalMediaTrack);

    /// Create the element for a participant.
    fn create_participant(&mut self, participant: &ParticipantSid, identity: &str);

    /// Remove a participant's element.
    fn remove_participant(&mut self, participant: &ParticipantSid);

    /// Attach a remote media track to its participant's element.
    fn attach_track(&mut self, participant: &ParticipantSid, track: &RemoteTrack);

    fn detach_track(&mut self, participant: &ParticipantSid, track: &RemoteTrack);

    fn draw_pointer(&mut self, participant: &ParticipantSid, message: &PointerMessage);
}
