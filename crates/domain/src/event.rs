//! Event: an immutable record of something that happened to a remote.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::RemoteId;

/// UTC timestamp attached to every event.
pub type Timestamp = DateTime<Utc>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Belief changed, from a dispatch or a sensor.
    StateChanged,
    /// The transport acknowledged a command.
    CommandSent,
    /// The transport rejected a command.
    CommandFailed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub remote_id: RemoteId,
    pub event_type: EventType,
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
}

impl Event {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(remote_id: RemoteId, event_type: EventType, data: serde_json::Value) -> Self {
        Self {
            remote_id,
            event_type,
            data,
            timestamp: Utc::now(),
        }
    }
}
