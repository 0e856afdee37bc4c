use scoredeck_core::suggest::fetch_suggestions;
use scoredeck_core::Config;

use super::CliResult;

pub fn run() -> CliResult {
    let config = Config::load()?;
    let Some(url) = config.suggestions.url else {
        // No source configured is the silent-degradation case.
        return Ok(());
    };
    let rt = tokio::runtime::Runtime::new()?;
    for name in rt.block_on(fetch_suggestions(&url)) {
        println!("{name}");
    }
    Ok(())
}
