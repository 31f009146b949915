//! Session client for the video session demo.
//!
//! Drives one real-time session at a time: fetches an access token, joins
//! the session through the host's SDK, and keeps the host's view in step
//! with the remote participants and their tracks.
//!
//! # Modules
//!
//! - `config` - Client configuration
//! - `controller` - Session lifecycle actor and its handle
//! - `errors` - Error types
//! - `events` - Typed session events
//! - `participants` - Participant and track bookkeeping
//! - `pointer` - Pointer messages over the data track
//! - `sdk` - Traits the host implements over its video SDK
//! - `state` - Session states and control enablement
//! - `token_client` - Access token acquisition
//! - `view` - Rendering boundary

pub mod config;
pub mod controller;
pub mod errors;
pub mod events;
pub mod participants;
pub mod pointer;
pub mod sdk;
pub mod state;
pub mod token_client;
pub mod view;

pub use controller::{prepare_local_tracks, SessionController, SessionControllerHandle};
pub use errors::ClientError;
pub use events::SessionEvent;
pub use state::{ControlState, SessionState};
