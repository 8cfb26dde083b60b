// Diagnostic log - capped record of recoverable navigation failures
use crate::error::NavErrorKind;
use crate::section::SectionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recoverable failure, with enough surrounding state to reconstruct
/// what the tracker was doing. Persisted as a JSON array for later
/// retrieval; never shown to the user.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorRecord {
    pub timestamp: DateTime<Utc>,
    pub kind: NavErrorKind,
    /// The section the failing operation was aimed at, when there was one.
    pub section: Option<SectionId>,
    pub current_section: SectionId,
    pub last_valid_section: Option<SectionId>,
    pub history: Vec<SectionId>,
    /// Free-form detail, e.g. the fallback action taken.
    pub context: serde_json::Value,
}

/// FIFO-bounded in-memory log, mirrored to storage by the tracker.
pub struct ErrorLog {
    records: Vec<ErrorRecord>,
    max: usize,
}

impl ErrorLog {
    pub fn new(max: usize) -> Self {
        Self {
            records: Vec::new(),
            max,
        }
    }

    /// Rebuilds the log from its persisted JSON form. Anything unparseable
    /// yields an empty log; diagnostics are not worth failing over.
    pub fn restore(json: &str, max: usize) -> Self {
        let mut records: Vec<ErrorRecord> = serde_json::from_str(json).unwrap_or_default();
        if records.len() > max {
            let excess = records.len() - max;
            records.drain(..excess);
        }
        Self { records, max }
    }

    pub fn push(&mut self, record: ErrorRecord) {
        self.records.push(record);
        if self.records.len() > self.max {
            let excess = self.records.len() - self.max;
            self.records.drain(..excess);
        }
    }

    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.records)
    }
}
