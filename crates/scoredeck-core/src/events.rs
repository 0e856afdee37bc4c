//! State-change events.
//!
//! Every mutating operation on the session produces an [`Event`]
//! stamped with the wall-clock time it happened. The CLI prints them as
//! JSON; other adapters can subscribe to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a slot rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationDirection {
    Left,
    Right,
}

/// Every state change in the system produces an Event.
/// The CLI prints them as JSON; adapters can subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerConfigured {
        total_seconds: u32,
        at: DateTime<Utc>,
    },
    TimerStarted {
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
    TimerTicked {
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
    /// Fired exactly once per run, when the countdown reaches zero.
    TimerExpired {
        at: DateTime<Utc>,
    },
    /// A slot count changed (increment or decrement).
    SlotChanged {
        index: usize,
        name: String,
        count: u32,
        at: DateTime<Utc>,
    },
    SlotRenamed {
        index: usize,
        name: String,
        at: DateTime<Utc>,
    },
    SlotsRotated {
        direction: RotationDirection,
        at: DateTime<Utc>,
    },
    OccupancyChanged {
        occupancy: u32,
        slot_count: usize,
        at: DateTime<Utc>,
    },
    /// A snapshot was delivered to the form gateway.
    Submitted {
        session_id: String,
        at: DateTime<Utc>,
    },
    SessionReset {
        session_id: String,
        at: DateTime<Utc>,
    },
}
