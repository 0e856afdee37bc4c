use scoredeck_core::{clock, Config, FormGateway, SubmitOutcome};

use super::{open_controller, CliResult};

pub fn run(session: Option<&str>) -> CliResult {
    let config = Config::load()?;
    let gateway = FormGateway::from_config(&config.form)?;
    let mut ctl = open_controller(session)?;

    // The snapshot is captured before the transport runs and stays
    // fixed; the last-sent marker lands on whatever state exists when
    // the transport finishes.
    let snapshot = ctl.snapshot(clock::now_local_string());
    let rt = tokio::runtime::Runtime::new()?;
    let outcome = rt.block_on(gateway.submit(&snapshot));

    match outcome {
        SubmitOutcome::Sent { at } => {
            let event = ctl.mark_sent(at)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
            Ok(())
        }
        SubmitOutcome::Failed { reason } => Err(format!(
            "submission failed ({reason}); tallies are unchanged -- run `scoredeck export` to save a CSV copy"
        )
        .into()),
    }
}
