//! CSV export of the current session state.
//!
//! The export is the offline fallback when submission fails: a UTF-8
//! CSV with a byte-order marker (so spreadsheet imports detect the
//! encoding), one header row and one data row with the fixed four
//! name/count column pairs. Export is one-way; there is no import path.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::session::SessionState;
use crate::submit::SNAPSHOT_SLOTS;

/// Byte-order marker prepended so spreadsheet tools pick up UTF-8.
pub const BOM: &str = "\u{feff}";

/// Label exported for occupied slots that were never named.
const UNSET_LABEL: &str = "unset";

/// Label exported for positions beyond the occupancy or marked empty.
const UNUSED_LABEL: &str = "unused";

/// A fully rendered export file: name plus contents, ready to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub contents: String,
}

impl ExportArtifact {
    /// Render the current state as a CSV artifact.
    ///
    /// The filename carries the session id and a millisecond timestamp
    /// so repeated exports never collide.
    pub fn build(state: &SessionState, now_local: &str, epoch_ms: i64) -> Self {
        let mut header = String::from("timestamp,session");
        for i in 1..=SNAPSHOT_SLOTS {
            header.push_str(&format!(",name_{i},count_{i}"));
        }

        let mut row = format!("{},{}", csv_field(now_local), csv_field(&state.session_id));
        for i in 0..SNAPSHOT_SLOTS {
            let (name, count) = match state.slots.get(i) {
                Some(slot) if !slot.is_empty => {
                    let name = if slot.name.trim().is_empty() {
                        UNSET_LABEL.to_string()
                    } else {
                        slot.name.clone()
                    };
                    (name, slot.count)
                }
                _ => (UNUSED_LABEL.to_string(), 0),
            };
            row.push_str(&format!(",{},{count}", csv_field(&name)));
        }

        Self {
            filename: format!("counter_{}_{epoch_ms}.csv", state.session_id),
            contents: format!("{BOM}{header}\n{row}\n"),
        }
    }

    /// Write the artifact into `dir` and return the file's path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, self.contents.as_bytes())?;
        Ok(path)
    }
}

/// Quote a field when it would break the row.
fn csv_field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') || raw.contains('\n') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
