use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::plan::PlannedUpdate;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of one attempt to write a memo to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLogEntry {
    pub transaction_id: String,
    pub previous_memo: String,
    pub new_memo: String,
    pub label_appended: String,
    pub succeeded: bool,
}

/// Memo write to send back to the ledger to restore a previous state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoRequest {
    pub transaction_id: String,
    pub memo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLog {
    pub entries: Vec<UpdateLogEntry>,
}

impl UpdateLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, update: &PlannedUpdate) {
        self.record(update, true);
    }

    pub fn record_failure(&mut self, update: &PlannedUpdate) {
        tracing::warn!(transaction = %update.transaction_id, "memo update failed");
        self.record(update, false);
    }

    fn record(&mut self, update: &PlannedUpdate, succeeded: bool) {
        self.entries.push(UpdateLogEntry {
            transaction_id: update.transaction_id.clone(),
            previous_memo: update.previous_memo.clone(),
            new_memo: update.new_memo.clone(),
            label_appended: update.label_appended.clone(),
            succeeded,
        });
    }

    /// Requests that restore every successfully updated memo, most recent
    /// first. Failed attempts never touched the ledger and are skipped.
    pub fn undo_requests(&self) -> Vec<UndoRequest> {
        self.entries
            .iter()
            .rev()
            .filter(|e| e.succeeded)
            .map(|e| UndoRequest {
                transaction_id: e.transaction_id.clone(),
                memo: e.previous_memo.clone(),
            })
            .collect()
    }

    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.succeeded).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }

    pub fn to_json(&self) -> Result<String, LogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(data: &str) -> Result<Self, LogError> {
        Ok(serde_json::from_str(data)?)
    }
}
