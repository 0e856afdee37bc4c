//! Snapshot assembly and the form submission gateway.
//!
//! The external form takes a fixed field set: session id, four
//! (name, count) pairs, and a local timestamp. The snapshot therefore
//! always has exactly four entries no matter the current occupancy --
//! that arity is a hard external contract. The gateway is fire-and-
//! forget: the endpoint gives no readable response, so the only two
//! outcomes are sent and failed.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::clock;
use crate::error::SubmitError;
use crate::session::SessionState;
use crate::storage::FormConfig;

/// Number of (name, count) pairs the form expects.
pub const SNAPSHOT_SLOTS: usize = 4;

/// Label transmitted for positions beyond the current occupancy or
/// marked empty.
pub const UNUSED_LABEL: &str = "unused";

/// One transmitted (name, count) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotEntry {
    pub name: String,
    pub count: u32,
}

/// Immutable fixed-shape copy of session data captured at the moment of
/// submission. Mutations made while a submission is in flight do not
/// affect it.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub session_id: String,
    pub entries: [SnapshotEntry; SNAPSHOT_SLOTS],
    pub submitted_at_local: String,
}

/// Build the fixed-arity snapshot for the current state.
///
/// Occupied slots with a blank name fall back to a positional label so
/// the form row stays readable.
pub fn build_snapshot(state: &SessionState, submitted_at_local: String) -> Snapshot {
    let entries = std::array::from_fn(|i| match state.slots.get(i) {
        Some(slot) if !slot.is_empty => SnapshotEntry {
            name: if slot.name.trim().is_empty() {
                format!("counter {}", i + 1)
            } else {
                slot.name.clone()
            },
            count: slot.count,
        },
        _ => SnapshotEntry {
            name: UNUSED_LABEL.to_string(),
            count: 0,
        },
    });
    Snapshot {
        session_id: state.session_id.clone(),
        entries,
        submitted_at_local,
    }
}

/// Outcome of one submission attempt. There is deliberately no richer
/// response type: the transport cannot be interrogated further.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Sent { at: DateTime<Utc> },
    Failed { reason: String },
}

impl SubmitOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SubmitOutcome::Sent { .. })
    }
}

/// One-way POST gateway to the external form endpoint.
pub struct FormGateway {
    endpoint: Url,
    entry_session_id: String,
    entry_names: Vec<String>,
    entry_counts: Vec<String>,
    entry_submitted_at: String,
    client: Client,
}

impl FormGateway {
    /// Build a gateway from the `[form]` configuration section.
    pub fn from_config(config: &FormConfig) -> Result<Self, SubmitError> {
        if config.url.is_empty() {
            return Err(SubmitError::EndpointNotConfigured);
        }
        let endpoint = Url::parse(&config.url).map_err(|e| SubmitError::InvalidEndpoint {
            url: config.url.clone(),
            message: e.to_string(),
        })?;
        if config.entry_names.len() != SNAPSHOT_SLOTS || config.entry_counts.len() != SNAPSHOT_SLOTS
        {
            return Err(SubmitError::Misconfigured(format!(
                "expected {SNAPSHOT_SLOTS} entry_names and entry_counts, got {} and {}",
                config.entry_names.len(),
                config.entry_counts.len()
            )));
        }
        Ok(Self {
            endpoint,
            entry_session_id: config.entry_session_id.clone(),
            entry_names: config.entry_names.clone(),
            entry_counts: config.entry_counts.clone(),
            entry_submitted_at: config.entry_submitted_at.clone(),
            client: Client::new(),
        })
    }

    /// POST the snapshot as a form body.
    ///
    /// The endpoint never exposes a readable response, so a send that
    /// does not error at the transport level counts as delivered.
    pub async fn submit(&self, snapshot: &Snapshot) -> SubmitOutcome {
        let mut form: Vec<(&str, String)> = Vec::with_capacity(2 + SNAPSHOT_SLOTS * 2);
        form.push((&self.entry_session_id, snapshot.session_id.clone()));
        for (i, entry) in snapshot.entries.iter().enumerate() {
            form.push((&self.entry_names[i], entry.name.clone()));
            form.push((&self.entry_counts[i], entry.count.to_string()));
        }
        form.push((&self.entry_submitted_at, snapshot.submitted_at_local.clone()));

        match self
            .client
            .post(self.endpoint.clone())
            .form(&form)
            .send()
            .await
        {
            Ok(_) => SubmitOutcome::Sent { at: clock::now() },
            Err(e) => SubmitOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;

    fn form_config(url: &str) -> FormConfig {
        FormConfig {
            url: url.to_string(),
            entry_session_id: "entry.100".into(),
            entry_names: (1..=4).map(|i| format!("entry.n{i}")).collect(),
            entry_counts: (1..=4).map(|i| format!("entry.c{i}")).collect(),
            entry_submitted_at: "entry.900".into(),
        }
    }

    #[test]
    fn snapshot_is_always_four_entries() {
        for occupancy in 1..=4u32 {
            let mut state = SessionState::fresh("alpha");
            state.set_occupancy(occupancy);
            let snapshot = build_snapshot(&state, "2026-08-26 10:00:00".into());
            assert_eq!(snapshot.entries.len(), SNAPSHOT_SLOTS);
        }
    }

    #[test]
    fn positions_beyond_occupancy_use_sentinel() {
        let mut state = SessionState::fresh("alpha");
        state.set_occupancy(1);
        state.slots.rename(0, "alice");
        state.slots.increment(0);
        let snapshot = build_snapshot(&state, String::new());
        assert_eq!(snapshot.entries[0].name, "alice");
        assert_eq!(snapshot.entries[0].count, 1);
        for entry in &snapshot.entries[1..] {
            assert_eq!(entry.name, UNUSED_LABEL);
            assert_eq!(entry.count, 0);
        }
    }

    #[test]
    fn reserved_slot_transmits_as_unused() {
        let mut state = SessionState::fresh("alpha");
        state.set_occupancy(3);
        let snapshot = build_snapshot(&state, String::new());
        assert_eq!(snapshot.entries[3].name, UNUSED_LABEL);
        assert_eq!(snapshot.entries[3].count, 0);
    }

    #[test]
    fn blank_occupied_names_get_positional_labels() {
        let state = SessionState::fresh("alpha");
        let snapshot = build_snapshot(&state, String::new());
        assert_eq!(snapshot.entries[0].name, "counter 1");
        assert_eq!(snapshot.entries[3].name, "counter 4");
    }

    #[test]
    fn gateway_rejects_missing_endpoint() {
        let config = FormConfig::default();
        assert!(matches!(
            FormGateway::from_config(&config),
            Err(SubmitError::EndpointNotConfigured)
        ));
    }

    #[test]
    fn gateway_rejects_wrong_field_arity() {
        let mut config = form_config("https://example.com/formResponse");
        config.entry_counts.pop();
        assert!(matches!(
            FormGateway::from_config(&config),
            Err(SubmitError::Misconfigured(_))
        ));
    }

    #[tokio::test]
    async fn submit_posts_fixed_field_set() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/formResponse")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("entry.100".into(), "alpha".into()),
                mockito::Matcher::UrlEncoded("entry.n1".into(), "alice".into()),
                mockito::Matcher::UrlEncoded("entry.c1".into(), "3".into()),
                mockito::Matcher::UrlEncoded("entry.n4".into(), UNUSED_LABEL.into()),
                mockito::Matcher::UrlEncoded("entry.c4".into(), "0".into()),
            ]))
            .with_status(200)
            .create_async()
            .await;

        let mut state = SessionState::fresh("alpha");
        state.set_occupancy(3);
        state.slots.rename(0, "alice");
        for _ in 0..3 {
            state.slots.increment(0);
        }
        let gateway =
            FormGateway::from_config(&form_config(&format!("{}/formResponse", server.url())))
                .unwrap();
        let snapshot = build_snapshot(&state, "2026-08-26 10:00:00".into());
        let outcome = gateway.submit(&snapshot).await;
        assert!(outcome.is_sent());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unreachable_endpoint_reports_failure() {
        // Port 1 is never listening; the connection is refused.
        let gateway = FormGateway::from_config(&form_config("http://127.0.0.1:1/form")).unwrap();
        let snapshot = build_snapshot(&SessionState::fresh("alpha"), String::new());
        let outcome = gateway.submit(&snapshot).await;
        assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
    }
}
