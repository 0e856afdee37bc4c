use clap::Subcommand;
use scoredeck_core::session::DEFAULT_SESSION_ID;
use scoredeck_core::SessionStore;

use super::{open_controller, resolve_session, CliResult};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Print the current session state as JSON
    Status,
    /// Pin a session id so later invocations stay on it
    Use {
        /// Session identifier; "default" clears the pin
        id: String,
    },
    /// Delete the persisted record for the session
    Reset,
}

pub fn run(session: Option<&str>, action: SessionAction) -> CliResult {
    match action {
        SessionAction::Status => {
            let ctl = open_controller(session)?;
            println!("{}", serde_json::to_string_pretty(ctl.state())?);
        }
        SessionAction::Use { id } => {
            let store = SessionStore::open()?;
            if id == DEFAULT_SESSION_ID || id.is_empty() {
                store.set_active_session(None)?;
                println!("session pin cleared (using \"{DEFAULT_SESSION_ID}\")");
            } else {
                store.set_active_session(Some(&id))?;
                println!("session pinned: {id}");
            }
        }
        SessionAction::Reset => {
            let ctl = open_controller(session)?;
            let event = ctl.reset()?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
    }
    Ok(())
}

// resolve_session is exercised here so the precedence stays documented.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flag_wins_over_pin() {
        let store = SessionStore::open_memory().unwrap();
        store.set_active_session(Some("pinned")).unwrap();
        assert_eq!(resolve_session(&store, Some("flag")).unwrap(), "flag");
        assert_eq!(resolve_session(&store, None).unwrap(), "pinned");
    }

    #[test]
    fn falls_back_to_default() {
        let store = SessionStore::open_memory().unwrap();
        assert_eq!(
            resolve_session(&store, None).unwrap(),
            DEFAULT_SESSION_ID
        );
        assert_eq!(
            resolve_session(&store, Some("")).unwrap(),
            DEFAULT_SESSION_ID
        );
    }
}
