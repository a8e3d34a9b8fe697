use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// What the renderer may do to a fragment once shrinking alone cannot
/// make the label fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Drop the fragment entirely.
    #[default]
    Omit,
    /// Cut characters from the end, even if the fragment is not shrinkable.
    Truncate,
}

fn default_gap() -> usize {
    1
}

/// One independently truncatable or omittable piece of label text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    #[serde(default)]
    pub shrinkable: bool,
    #[serde(default)]
    pub overflow: OverflowPolicy,
    /// Spaces placed between this fragment and the next non-empty one.
    #[serde(default = "default_gap")]
    pub gap_after: usize,
}

impl Fragment {
    pub fn new(text: impl Into<String>, shrinkable: bool, overflow: OverflowPolicy) -> Self {
        Fragment {
            text: text.into(),
            shrinkable,
            overflow,
            gap_after: 1,
        }
    }

    /// Never shrunk, only force-truncated as a last resort.
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::new(text, false, OverflowPolicy::Truncate)
    }

    /// Kept whole or dropped whole.
    pub fn omittable(text: impl Into<String>) -> Self {
        Self::new(text, false, OverflowPolicy::Omit)
    }

    /// First to give up characters when space runs short.
    pub fn shrinkable(text: impl Into<String>) -> Self {
        Self::new(text, true, OverflowPolicy::Truncate)
    }

    pub fn with_gap_after(mut self, gap_after: usize) -> Self {
        self.gap_after = gap_after;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// An annotation derived from an imported purchase record, waiting to be
/// matched to a ledger transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub date: NaiveDate,
    pub amount: Money,
    pub payee_name: String,
    pub fragments: Vec<Fragment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_policies() {
        let f = Fragment::fixed("memo");
        assert!(!f.shrinkable);
        assert_eq!(f.overflow, OverflowPolicy::Truncate);

        let o = Fragment::omittable("https://example.com/");
        assert!(!o.shrinkable);
        assert_eq!(o.overflow, OverflowPolicy::Omit);

        let s = Fragment::shrinkable("Anker charger").with_gap_after(2);
        assert!(s.shrinkable);
        assert_eq!(s.gap_after, 2);
    }

    #[test]
    fn fragment_deserializes_with_defaults() {
        let f: Fragment = serde_json::from_str(r#"{"text":"hello"}"#).unwrap();
        assert_eq!(f.gap_after, 1);
        assert!(!f.shrinkable);
        assert_eq!(f.overflow, OverflowPolicy::Omit);

        let t: Fragment =
            serde_json::from_str(r#"{"text":"x","overflow":"truncate","shrinkable":true}"#)
                .unwrap();
        assert_eq!(t.overflow, OverflowPolicy::Truncate);
    }
}
