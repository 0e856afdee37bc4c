use scoredeck_core::{clock, ExportArtifact};
use std::path::PathBuf;

use super::{open_controller, CliResult};

pub fn run(session: Option<&str>, dir: Option<PathBuf>) -> CliResult {
    let ctl = open_controller(session)?;
    let artifact = ExportArtifact::build(ctl.state(), &clock::now_local_string(), clock::epoch_ms());
    let dir = dir.unwrap_or_else(|| PathBuf::from("."));
    let path = artifact.write_to(&dir)?;
    println!("wrote {}", path.display());
    Ok(())
}
