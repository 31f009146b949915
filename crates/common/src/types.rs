//! Common data types for the video session demo components.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Session-scoped identifier the SDK assigns to a remote participant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantSid(pub String);

impl ParticipantSid {
    /// Create a participant sid from any string-like value
    #[must_use]
    pub fn new(sid: impl Into<String>) -> Self {
        Self(sid.into())
    }

    /// Borrow the raw sid
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantSid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantSid {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identifier the SDK assigns to a published track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackSid(pub String);

impl TrackSid {
    /// Create a track sid from any string-like value
    #[must_use]
    pub fn new(sid: impl Into<String>) -> Self {
        Self(sid.into())
    }

    /// Borrow the raw sid
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackSid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackSid {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Kind of a media or data track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Audio,
    Video,
    Data,
}

impl TrackKind {
    /// Audio and video tracks are rendered; data tracks are consumed as messages.
    #[must_use]
    pub fn is_media(self) -> bool {
        matches!(self, Self::Audio | Self::Video)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Data => "data",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
