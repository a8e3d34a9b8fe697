use serde::{Deserialize, Serialize};

use super::label::Label;
use super::transaction::LedgerTransaction;

/// A label together with every transaction it could plausibly belong to,
/// closest date first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidateSet {
    pub label: Label,
    pub candidates: Vec<LedgerTransaction>,
}

/// The single transaction a label was assigned, if any was left unclaimed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizedMatch {
    pub label: Label,
    pub transaction: Option<LedgerTransaction>,
}

impl FinalizedMatch {
    pub fn is_matched(&self) -> bool {
        self.transaction.is_some()
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction.as_ref().map(|tx| tx.id.as_str())
    }
}
