//! Pointer sharing over the local data track.
//!
//! Wire format (JSON, one message per pointer move):
//!
//! ```json
//! {"mouseDown": true, "mouseCoordinates": {"x": 10.0, "y": 20.5}}
//! ```

use crate::sdk::LocalDataTrack;
use common::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerCoordinates {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerMessage {
    pub mouse_down: bool,
    pub mouse_coordinates: PointerCoordinates,
}

impl PointerMessage {
    #[must_use]
    pub fn new(mouse_down: bool, x: f64, y: f64) -> Self {
        Self {
            mouse_down,
            mouse_coordinates: PointerCoordinates { x, y },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }
}

/// Turns local pointer input into messages on the data track.
pub struct PointerFeed {
    track: Arc<dyn LocalDataTrack>,
    mouse_down: bool,
}

impl PointerFeed {
    pub fn new(track: Arc<dyn LocalDataTrack>) -> Self {
        Self {
            track,
            mouse_down: false,
        }
    }

    pub fn mouse_down(&mut self) {
        self.mouse_down = true;
    }

    pub fn mouse_up(&mut self) {
        self.mouse_down = false;
    }

    #[must_use]
    pub fn is_mouse_down(&self) -> bool {
        self.mouse_down
    }

    /// Publish the current position and button state.
    pub fn mouse_move(&self, x: f64, y: f64) -> Result<()> {
        let message = PointerMessage::new(self.mouse_down, x, y).to_json()?;
        self.track.send(&message)
    }
}
