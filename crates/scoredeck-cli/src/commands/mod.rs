pub mod config;
pub mod export;
pub mod session;
pub mod slot;
pub mod submit;
pub mod suggest;
pub mod timer;

use scoredeck_core::session::DEFAULT_SESSION_ID;
use scoredeck_core::{Config, Event, SessionController, SessionStore};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Resolve the effective session id: the explicit `--session` flag wins,
/// then the pinned active session, then the fixed default.
pub fn resolve_session(
    store: &SessionStore,
    explicit: Option<&str>,
) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(id) = explicit {
        if !id.is_empty() {
            return Ok(id.to_string());
        }
    }
    Ok(store
        .active_session()?
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string()))
}

/// Open the controller for the resolved session under the configured
/// expiry policy.
pub fn open_controller(
    explicit: Option<&str>,
) -> Result<SessionController, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = SessionStore::open()?;
    let session_id = resolve_session(&store, explicit)?;
    Ok(SessionController::open(
        store,
        &session_id,
        config.expiry.policy(),
    )?)
}

/// Print an event (or a no-op notice) the way every subcommand does.
pub fn print_outcome(event: Option<Event>) -> CliResult {
    match event {
        Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
        None => println!("{{\"type\": \"noop\"}}"),
    }
    Ok(())
}

/// Lenient numeric argument parser: malformed input coerces to 0
/// instead of aborting the command (the core then clamps into range
/// where a range applies).
pub fn lenient_u32(raw: &str) -> Result<u32, std::convert::Infallible> {
    Ok(raw.trim().parse().unwrap_or(0))
}
