//! Countdown timer state machine.
//!
//! The timer is a pure state machine -- it owns no thread and no clock.
//! The caller feeds it one [`tick`] per second while it is running (the
//! tick source lives in [`crate::clock`]).
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Running -> (Paused -> Running)* -> Expired
//! ```
//!
//! `Expired` is terminal until [`configure`] reinitializes the timer to
//! `Idle`. Reconfiguring while `Running` is rejected (the caller must
//! pause first); this is deliberate, so a mid-run "set" cannot race the
//! tick source.
//!
//! [`tick`]: CountdownTimer::tick
//! [`configure`]: CountdownTimer::configure

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Expired,
}

/// Result of feeding one tick to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running; nothing happened.
    Ignored,
    /// One second elapsed.
    Ticked { remaining_seconds: u32 },
    /// The countdown just reached zero. Reported exactly once per run.
    Expired,
}

/// Countdown timer: configured duration, remaining duration, phase.
///
/// Invariant: `remaining_seconds <= configured_seconds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownTimer {
    configured_seconds: u32,
    remaining_seconds: u32,
    phase: TimerPhase,
}

impl Default for CountdownTimer {
    /// 5:00, the station default.
    fn default() -> Self {
        Self::new(5, 0)
    }
}

impl CountdownTimer {
    pub fn new(minutes: u32, seconds: u32) -> Self {
        let total = total_seconds(minutes, seconds);
        Self {
            configured_seconds: total,
            remaining_seconds: total,
            phase: TimerPhase::Idle,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn configured_seconds(&self) -> u32 {
        self.configured_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Set a new duration and reset the countdown to it.
    ///
    /// Rejected (returns `false`, state untouched) while `Running`.
    /// Otherwise the phase returns to `Idle`, which is also the only way
    /// out of `Expired`.
    pub fn configure(&mut self, minutes: u32, seconds: u32) -> bool {
        if self.phase == TimerPhase::Running {
            return false;
        }
        let total = total_seconds(minutes, seconds);
        self.configured_seconds = total;
        self.remaining_seconds = total;
        self.phase = TimerPhase::Idle;
        true
    }

    /// Begin (or resume) the countdown.
    ///
    /// A timer with nothing left to count (`remaining_seconds == 0`)
    /// cannot start; that includes the `Expired` phase.
    pub fn start(&mut self) -> bool {
        if self.remaining_seconds == 0 {
            return false;
        }
        match self.phase {
            TimerPhase::Idle | TimerPhase::Paused => {
                self.phase = TimerPhase::Running;
                true
            }
            TimerPhase::Running | TimerPhase::Expired => false,
        }
    }

    /// Suspend the countdown, retaining the remaining duration.
    pub fn pause(&mut self) -> bool {
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Paused;
            true
        } else {
            false
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Only meaningful while `Running`; the transition to `Expired`
    /// happens on the tick that reaches zero, so `Expired` is reported
    /// exactly once per run.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != TimerPhase::Running {
            return TickOutcome::Ignored;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = TimerPhase::Expired;
            TickOutcome::Expired
        } else {
            TickOutcome::Ticked {
                remaining_seconds: self.remaining_seconds,
            }
        }
    }
}

/// Saturating so an absurd minutes value caps out instead of wrapping.
fn total_seconds(minutes: u32, seconds: u32) -> u32 {
    minutes.saturating_mul(60).saturating_add(seconds)
}

/// `mm:ss` display form (`330` -> `"05:30"`).
pub fn format_mmss(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
