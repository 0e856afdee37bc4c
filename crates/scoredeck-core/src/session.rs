//! Session state and its controller.
//!
//! [`SessionState`] is the single root object: timer + slot set +
//! session id + last-submission marker. [`SessionController`] is the one
//! owner of a live state (no ambient shared mutables): every mutation
//! goes through one of its methods, which applies the transition,
//! synchronously persists the whole record, and returns the resulting
//! [`Event`]. No-ops return `None` and write nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::error::Result;
use crate::events::{Event, RotationDirection};
use crate::slots::{clamp_occupancy, SlotSet};
use crate::storage::{ExpiryPolicy, SessionStore};
use crate::submit::{build_snapshot, Snapshot};
use crate::timer::{CountdownTimer, TickOutcome};

/// Session id used when the operator never chose one.
pub const DEFAULT_SESSION_ID: &str = "default";

/// The unit of persistence: everything one station session tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: String,
    pub occupancy: u32,
    pub timer: CountdownTimer,
    pub slots: SlotSet,
    #[serde(default)]
    pub last_sent_at: Option<DateTime<Utc>>,
}

impl SessionState {
    /// Default state for a new or expired session: four seats, 5:00
    /// timer, blank slots, never submitted.
    pub fn fresh(session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            occupancy: 4,
            timer: CountdownTimer::default(),
            slots: SlotSet::new(4),
            last_sent_at: None,
        }
    }

    /// Change the occupancy (clamped to `[1, 4]`) and resize the slots
    /// to match. Returns `false` when nothing changed.
    pub fn set_occupancy(&mut self, raw: u32) -> bool {
        let occupancy = clamp_occupancy(raw);
        if occupancy == self.occupancy {
            return false;
        }
        self.occupancy = occupancy;
        self.slots.resize(occupancy);
        true
    }
}

/// Owns a [`SessionStore`] plus the live [`SessionState`] and keeps the
/// two in lockstep: the store always reflects the latest in-memory state
/// after a mutating call returns.
pub struct SessionController {
    store: SessionStore,
    state: SessionState,
}

impl SessionController {
    /// Load (or freshly create) the session and take ownership of it.
    pub fn open(store: SessionStore, session_id: &str, policy: ExpiryPolicy) -> Result<Self> {
        let state = store.load(session_id, policy, clock::now())?;
        Ok(Self { store, state })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session_id(&self) -> &str {
        &self.state.session_id
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.state, clock::now())
    }

    // ── Timer ────────────────────────────────────────────────────────

    /// Set a new countdown duration. Rejected while the timer is
    /// running (pause first); the rejection is a clean no-op.
    pub fn configure_timer(&mut self, minutes: u32, seconds: u32) -> Result<Option<Event>> {
        if !self.state.timer.configure(minutes, seconds) {
            return Ok(None);
        }
        self.persist()?;
        Ok(Some(Event::TimerConfigured {
            total_seconds: self.state.timer.configured_seconds(),
            at: clock::now(),
        }))
    }

    pub fn start_timer(&mut self) -> Result<Option<Event>> {
        if !self.state.timer.start() {
            return Ok(None);
        }
        self.persist()?;
        Ok(Some(Event::TimerStarted {
            remaining_seconds: self.state.timer.remaining_seconds(),
            at: clock::now(),
        }))
    }

    pub fn pause_timer(&mut self) -> Result<Option<Event>> {
        if !self.state.timer.pause() {
            return Ok(None);
        }
        self.persist()?;
        Ok(Some(Event::TimerPaused {
            remaining_seconds: self.state.timer.remaining_seconds(),
            at: clock::now(),
        }))
    }

    /// Feed one second to the timer. Returns `TimerExpired` on the tick
    /// that reaches zero, exactly once per run.
    pub fn tick_timer(&mut self) -> Result<Option<Event>> {
        match self.state.timer.tick() {
            TickOutcome::Ignored => Ok(None),
            TickOutcome::Ticked { remaining_seconds } => {
                self.persist()?;
                Ok(Some(Event::TimerTicked {
                    remaining_seconds,
                    at: clock::now(),
                }))
            }
            TickOutcome::Expired => {
                self.persist()?;
                Ok(Some(Event::TimerExpired { at: clock::now() }))
            }
        }
    }

    // ── Slots ────────────────────────────────────────────────────────

    pub fn increment_slot(&mut self, index: usize) -> Result<Option<Event>> {
        if !self.state.slots.increment(index) {
            return Ok(None);
        }
        self.persist()?;
        Ok(self.slot_changed(index))
    }

    pub fn decrement_slot(&mut self, index: usize) -> Result<Option<Event>> {
        if !self.state.slots.decrement(index) {
            return Ok(None);
        }
        self.persist()?;
        Ok(self.slot_changed(index))
    }

    pub fn rename_slot(&mut self, index: usize, name: &str) -> Result<Option<Event>> {
        if !self.state.slots.rename(index, name) {
            return Ok(None);
        }
        self.persist()?;
        Ok(Some(Event::SlotRenamed {
            index,
            name: name.to_string(),
            at: clock::now(),
        }))
    }

    pub fn rotate_left(&mut self) -> Result<Option<Event>> {
        self.rotate(RotationDirection::Left)
    }

    pub fn rotate_right(&mut self) -> Result<Option<Event>> {
        self.rotate(RotationDirection::Right)
    }

    fn rotate(&mut self, direction: RotationDirection) -> Result<Option<Event>> {
        let rotated = match direction {
            RotationDirection::Left => self.state.slots.rotate_left(),
            RotationDirection::Right => self.state.slots.rotate_right(),
        };
        if !rotated {
            return Ok(None);
        }
        self.persist()?;
        Ok(Some(Event::SlotsRotated {
            direction,
            at: clock::now(),
        }))
    }

    pub fn set_occupancy(&mut self, raw: u32) -> Result<Option<Event>> {
        if !self.state.set_occupancy(raw) {
            return Ok(None);
        }
        self.persist()?;
        Ok(Some(Event::OccupancyChanged {
            occupancy: self.state.occupancy,
            slot_count: self.state.slots.len(),
            at: clock::now(),
        }))
    }

    // ── Submission & lifecycle ───────────────────────────────────────

    /// Capture the immutable submission snapshot of the current state.
    pub fn snapshot(&self, submitted_at_local: String) -> Snapshot {
        build_snapshot(&self.state, submitted_at_local)
    }

    /// Record a successful submission. Applied to whatever state exists
    /// now, not to the snapshot that was transmitted.
    pub fn mark_sent(&mut self, at: DateTime<Utc>) -> Result<Event> {
        self.state.last_sent_at = Some(at);
        self.persist()?;
        Ok(Event::Submitted {
            session_id: self.state.session_id.clone(),
            at,
        })
    }

    /// Delete the persisted record, consuming the controller. The
    /// caller reinitializes by opening the session again, which now
    /// starts fresh.
    pub fn reset(self) -> Result<Event> {
        self.store.delete(&self.state.session_id)?;
        Ok(Event::SessionReset {
            session_id: self.state.session_id,
            at: clock::now(),
        })
    }

    fn slot_changed(&self, index: usize) -> Option<Event> {
        let slot = self.state.slots.get(index)?;
        Some(Event::SlotChanged {
            index,
            name: slot.name.clone(),
            count: slot.count,
            at: clock::now(),
        })
    }
}
