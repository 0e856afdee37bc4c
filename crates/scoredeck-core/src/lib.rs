//! # Scoredeck Core Library
//!
//! This library provides the core logic for Scoredeck, a single-operator
//! scorekeeping station: a fixed set of named counter slots plus one
//! countdown timer, persisted locally on every mutation and periodically
//! submitted to an external form endpoint. The CLI binary is a thin
//! adapter over this library.
//!
//! ## Architecture
//!
//! - **Timer**: a pure countdown state machine driven by external ticks
//! - **Slots**: the ordered counter-slot set with resize and rotation
//! - **Session**: the controller owning the composite state; every
//!   mutation synchronously persists the whole record
//! - **Storage**: SQLite key/value session records with read-time
//!   expiry, plus TOML-based configuration
//! - **Submit/Export**: fire-and-forget form submission and the CSV
//!   fallback artifact
//!
//! ## Key Components
//!
//! - [`CountdownTimer`]: timer state machine
//! - [`SlotSet`]: counter slots and rotation
//! - [`SessionController`]: state container and persistence driver
//! - [`SessionStore`]: persisted session records
//! - [`FormGateway`]: submission gateway

pub mod clock;
pub mod error;
pub mod events;
pub mod export;
pub mod session;
pub mod slots;
pub mod storage;
pub mod submit;
pub mod suggest;
pub mod timer;

pub use error::{ConfigError, CoreError, StorageError, SubmitError};
pub use events::{Event, RotationDirection};
pub use export::ExportArtifact;
pub use session::{SessionController, SessionState, DEFAULT_SESSION_ID};
pub use slots::{target_len, Slot, SlotSet, MAX_OCCUPANCY};
pub use storage::{Config, ExpiryPolicy, PersistedRecord, SessionStore};
pub use submit::{build_snapshot, FormGateway, Snapshot, SubmitOutcome};
pub use timer::{format_mmss, CountdownTimer, TimerPhase};
