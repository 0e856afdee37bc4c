use clap::Subcommand;
use scoredeck_core::{clock, format_mmss, Event, SessionController, TimerPhase};
use std::io::Write;
use std::time::Duration;

use super::{lenient_u32, open_controller, print_outcome, CliResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Set the countdown duration (rejected while running; pause first)
    Set {
        /// Minutes component (malformed input counts as 0)
        #[arg(default_value = "5", value_parser = lenient_u32)]
        minutes: u32,
        /// Seconds component (malformed input counts as 0)
        #[arg(default_value = "0", value_parser = lenient_u32)]
        seconds: u32,
    },
    /// Start (or resume) the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Drive the countdown live until it expires (Ctrl-C pauses)
    Run,
    /// Print the current timer state
    Status,
}

pub fn run(session: Option<&str>, action: TimerAction) -> CliResult {
    let mut ctl = open_controller(session)?;
    match action {
        TimerAction::Set { minutes, seconds } => {
            let event = ctl.configure_timer(minutes, seconds)?;
            if event.is_none() && ctl.state().timer.is_running() {
                return Err("timer is running; pause before setting a new duration".into());
            }
            print_outcome(event)?;
        }
        TimerAction::Start => print_outcome(ctl.start_timer()?)?,
        TimerAction::Pause => print_outcome(ctl.pause_timer()?)?,
        TimerAction::Run => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_live(&mut ctl))?;
        }
        TimerAction::Status => {
            let timer = &ctl.state().timer;
            println!(
                "{} ({:?})",
                format_mmss(timer.remaining_seconds()),
                timer.phase()
            );
        }
    }
    Ok(())
}

/// Start the countdown, or accept one that is already running -- a
/// session persisted mid-run loads in the `Running` phase and simply
/// resumes its countdown.
fn ensure_running(ctl: &mut SessionController) -> CliResult {
    if ctl.start_timer()?.is_some() || ctl.state().timer.is_running() {
        return Ok(());
    }
    match ctl.state().timer.phase() {
        TimerPhase::Expired => Err("timer already expired; set a new duration".into()),
        _ => Err("timer cannot start (no time remaining)".into()),
    }
}

/// Drive the timer off the one-second tick stream until it expires or
/// the operator interrupts. The guard keeps the tick source unique and
/// cancels it deterministically on every exit path.
async fn run_live(ctl: &mut SessionController) -> CliResult {
    ensure_running(ctl)?;

    let (guard, mut ticks) = clock::tick_stream(Duration::from_secs(1));
    let mut stdout = std::io::stdout();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                ctl.pause_timer()?;
                println!();
                println!("paused at {}", format_mmss(ctl.state().timer.remaining_seconds()));
                break;
            }
            tick = ticks.recv() => {
                if tick.is_none() {
                    break;
                }
                match ctl.tick_timer()? {
                    Some(Event::TimerExpired { .. }) => {
                        println!();
                        println!("time is up!");
                        break;
                    }
                    Some(Event::TimerTicked { remaining_seconds, .. }) => {
                        print!("\r{}", format_mmss(remaining_seconds));
                        stdout.flush()?;
                    }
                    _ => {}
                }
            }
        }
    }
    guard.cancel();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoredeck_core::{ExpiryPolicy, SessionStore};

    fn controller() -> SessionController {
        let store = SessionStore::open_memory().unwrap();
        SessionController::open(store, "alpha", ExpiryPolicy::default()).unwrap()
    }

    #[test]
    fn already_running_timer_is_driven_not_rejected() {
        let mut ctl = controller();
        ctl.configure_timer(0, 5).unwrap();
        ctl.start_timer().unwrap();
        // A later invocation loads the Running phase; driving it must
        // fall through to the tick loop rather than bail.
        assert!(ensure_running(&mut ctl).is_ok());
        assert!(matches!(
            ctl.tick_timer().unwrap(),
            Some(Event::TimerTicked { .. })
        ));
    }

    #[test]
    fn idle_timer_starts_normally() {
        let mut ctl = controller();
        ctl.configure_timer(0, 5).unwrap();
        assert!(ensure_running(&mut ctl).is_ok());
        assert!(ctl.state().timer.is_running());
    }

    #[test]
    fn exhausted_timer_cannot_be_driven() {
        let mut ctl = controller();
        ctl.configure_timer(0, 0).unwrap();
        let err = ensure_running(&mut ctl).unwrap_err();
        assert!(err.to_string().contains("no time remaining"));
    }

    #[test]
    fn expired_timer_asks_for_a_new_duration() {
        let mut ctl = controller();
        ctl.configure_timer(0, 1).unwrap();
        ctl.start_timer().unwrap();
        assert!(matches!(
            ctl.tick_timer().unwrap(),
            Some(Event::TimerExpired { .. })
        ));
        let err = ensure_running(&mut ctl).unwrap_err();
        assert!(err.to_string().contains("expired"));
    }
}
