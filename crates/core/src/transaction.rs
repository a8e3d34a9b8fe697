use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClearedState {
    Cleared,
    #[default]
    Uncleared,
    Reconciled,
}

/// A transaction as fetched from the budgeting ledger. Read-only here;
/// updates go back to the ledger by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerTransaction {
    pub id: String,
    pub date: NaiveDate,
    pub amount_milliunits: i64,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub category_assigned: bool,
    #[serde(default)]
    pub cleared: ClearedState,
}

impl LedgerTransaction {
    pub fn amount(&self) -> Money {
        Money::from_milliunits(self.amount_milliunits)
    }

    pub fn existing_memo(&self) -> &str {
        self.memo.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleared_state_uses_ledger_spelling() {
        let tx: LedgerTransaction = serde_json::from_str(
            r#"{"id":"t1","date":"2023-06-08","amount_milliunits":0,"cleared":"reconciled"}"#,
        )
        .unwrap();
        assert_eq!(tx.cleared, ClearedState::Reconciled);
        assert!(serde_json::from_str::<ClearedState>(r#""pending""#).is_err());
    }

    #[test]
    fn deserializes_minimal_ledger_record() {
        let tx: LedgerTransaction = serde_json::from_str(
            r#"{"id":"t1","date":"2023-06-08","amount_milliunits":-74970}"#,
        )
        .unwrap();
        assert_eq!(tx.existing_memo(), "");
        assert_eq!(tx.cleared, ClearedState::Uncleared);
        assert!(!tx.category_assigned);
        assert_eq!(tx.amount(), Money::from_milliunits(-74_970));
    }
}
