//! Name suggestion source.
//!
//! Optionally, a deployment publishes a tabular list of candidate
//! participant names (one per line, first line a header). It is fetched
//! once at startup; any failure degrades silently to no suggestions.

/// Fetch and parse the suggestion list. Never fails: an unreachable or
/// misbehaving source yields an empty set.
pub async fn fetch_suggestions(url: &str) -> Vec<String> {
    match try_fetch(url).await {
        Ok(names) => names,
        Err(_) => Vec::new(),
    }
}

async fn try_fetch(url: &str) -> Result<Vec<String>, reqwest::Error> {
    let body = reqwest::get(url).await?.text().await?;
    Ok(parse_suggestions(&body))
}

/// Parse the published list: drop the header line, trim and strip
/// surrounding quotes, skip blanks.
pub fn parse_suggestions(body: &str) -> Vec<String> {
    body.lines()
        .skip(1)
        .map(|line| line.trim().trim_matches('"').trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
