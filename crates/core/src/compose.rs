use serde::{Deserialize, Serialize};
use std::fmt;

use super::config::LabelConfig;
use super::label::{Fragment, Label};
use super::matched::FinalizedMatch;
use super::render::{self, RenderError};
use super::transaction::LedgerTransaction;

/// Advisory conditions found while composing a memo. The memo is still
/// produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// The label needs more room than the memo has left.
    InsufficientSpace { remaining: usize, needed: usize },
    /// The existing memo already carries a label.
    AlreadyLabeled { separator: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::InsufficientSpace { remaining, needed } => write!(
                f,
                "only {remaining} characters left in memo, label needs {needed}"
            ),
            Warning::AlreadyLabeled { separator } => {
                write!(f, "memo already contains a label ('{separator}')")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedMemo {
    pub new_memo: String,
    /// Separator, prefix and label as rendered onto the end of the memo.
    pub appended: String,
    pub warnings: Vec<Warning>,
}

/// Build the memo for `transaction` with `label` appended after the
/// separator and `prefix`.
///
/// The existing memo is kept byte for byte and only the appended part is
/// degraded, so `new_memo` is the previous memo, a gap, then `appended`. The
/// gap is skipped when the memo is empty or already ends in whitespace. A
/// memo longer than the limit on its own is the one case where it is cut;
/// nothing is appended then.
pub fn compose(
    label: &Label,
    transaction: &LedgerTransaction,
    prefix: &str,
    config: &LabelConfig,
) -> Result<ComposedMemo, RenderError> {
    let existing = transaction.existing_memo();
    let existing_len = existing.chars().count();
    let gap = usize::from(needs_gap(existing));

    let mut tail = Vec::with_capacity(label.fragments.len() + 2);
    tail.push(Fragment::omittable(config.separator.as_str()));
    tail.push(Fragment::omittable(prefix));
    tail.extend(label.fragments.iter().cloned());

    let mut warnings = Vec::new();

    let remaining = config.max_memo_length.saturating_sub(existing_len);
    let mut needed = render::unbounded_len(&tail);
    if needed > 0 {
        needed += gap;
    }
    if needed > remaining && remaining < config.low_space_warning_threshold {
        warnings.push(Warning::InsufficientSpace { remaining, needed });
    }

    if let Some(separator) = config
        .known_separators()
        .find(|sep| existing.contains(&format!("{sep} ")))
    {
        warnings.push(Warning::AlreadyLabeled {
            separator: separator.to_string(),
        });
    }

    let (new_memo, appended) = if existing_len <= config.max_memo_length {
        let budget = config.max_memo_length.saturating_sub(existing_len + gap);
        let text = render::render(&tail, budget)?;
        let new_memo = match (text.is_empty(), gap) {
            (true, _) => existing.to_string(),
            (false, 0) => format!("{existing}{text}"),
            (false, _) => format!("{existing} {text}"),
        };
        (new_memo, text)
    } else {
        tracing::debug!(
            transaction = %transaction.id,
            existing_len,
            "existing memo is over the limit on its own"
        );
        let mut fragments = Vec::with_capacity(tail.len() + 1);
        fragments.push(Fragment::fixed(existing));
        fragments.extend(tail);
        (render::render(&fragments, config.max_memo_length)?, String::new())
    };

    for warning in &warnings {
        tracing::warn!(label = %label.id, transaction = %transaction.id, "{warning}");
    }

    Ok(ComposedMemo {
        new_memo,
        appended,
        warnings,
    })
}

fn needs_gap(existing: &str) -> bool {
    existing.chars().last().is_some_and(|c| !c.is_whitespace())
}

/// Compose the memo for a resolved match. `None` when the label found no
/// transaction.
pub fn compose_match(
    matched: &FinalizedMatch,
    prefix: &str,
    config: &LabelConfig,
) -> Result<Option<ComposedMemo>, RenderError> {
    matched
        .transaction
        .as_ref()
        .map(|tx| compose(&matched.label, tx, prefix, config))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::transaction::ClearedState;
    use chrono::NaiveDate;

    fn label(fragments: Vec<Fragment>) -> Label {
        Label {
            id: "112-1".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 6, 8).unwrap(),
            amount: Money::from_milliunits(-74_970),
            payee_name: "Amazon".to_string(),
            fragments,
        }
    }

    fn tx(memo: Option<&str>) -> LedgerTransaction {
        LedgerTransaction {
            id: "t1".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 6, 8).unwrap(),
            amount_milliunits: -74_970,
            memo: memo.map(str::to_string),
            category_assigned: false,
            cleared: ClearedState::Cleared,
        }
    }

    fn order_label() -> Label {
        label(vec![
            Fragment::omittable("(charge 1 of 3)"),
            Fragment::shrinkable("Anker 4-port charger"),
            Fragment::omittable("https://www.example.com/"),
        ])
    }

    #[test]
    fn appends_separator_prefix_and_label() {
        let out = compose(
            &order_label(),
            &tx(Some("what is this?")),
            "M",
            &LabelConfig::default(),
        )
        .unwrap();
        assert_eq!(
            out.new_memo,
            "what is this? @@ M (charge 1 of 3) Anker 4-port charger https://www.example.com/"
        );
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn empty_memo_and_prefix_leave_no_gaps() {
        let out = compose(&order_label(), &tx(None), "", &LabelConfig::default()).unwrap();
        assert_eq!(
            out.new_memo,
            "@@ (charge 1 of 3) Anker 4-port charger https://www.example.com/"
        );
    }

    #[test]
    fn respects_configured_memo_limit() {
        let config = LabelConfig {
            max_memo_length: 58,
            ..LabelConfig::default()
        };
        let out = compose(&order_label(), &tx(Some("what is this?")), "M", &config).unwrap();
        assert_eq!(out.new_memo, "what is this? @@ M (charge 1 of 3) Anker 4-port charger");
    }

    #[test]
    fn warns_when_memo_nearly_full() {
        let existing = "x".repeat(190);
        let out = compose(
            &order_label(),
            &tx(Some(&existing)),
            "",
            &LabelConfig::default(),
        )
        .unwrap();
        assert!(out.new_memo.chars().count() <= 200);
        assert!(out.new_memo.starts_with(&existing));
        assert!(matches!(
            out.warnings.as_slice(),
            [Warning::InsufficientSpace { remaining: 10, .. }]
        ));
    }

    #[test]
    fn no_space_warning_when_headroom_is_large_enough() {
        // 20 characters left: above the threshold even though the label is longer.
        let existing = "x".repeat(180);
        let out = compose(
            &order_label(),
            &tx(Some(&existing)),
            "",
            &LabelConfig::default(),
        )
        .unwrap();
        assert!(out.warnings.is_empty());
        assert_eq!(out.new_memo, format!("{existing} @@ (charge 1 of 3)"));
    }

    #[test]
    fn space_warning_threshold_is_exclusive() {
        let config = LabelConfig::default();

        let at_threshold = "x".repeat(185);
        let out = compose(&order_label(), &tx(Some(&at_threshold)), "", &config).unwrap();
        assert!(out.warnings.is_empty(), "15 left: {:?}", out.warnings);

        let below = "x".repeat(186);
        let out = compose(&order_label(), &tx(Some(&below)), "", &config).unwrap();
        assert!(matches!(
            out.warnings.as_slice(),
            [Warning::InsufficientSpace { remaining: 14, needed: 65 }]
        ));
    }

    #[test]
    fn detects_current_and_legacy_separators() {
        let config = LabelConfig::default();
        let out = compose(&order_label(), &tx(Some("coffee @@ mug")), "", &config).unwrap();
        assert_eq!(
            out.warnings,
            vec![Warning::AlreadyLabeled {
                separator: "@@".to_string()
            }]
        );

        let out = compose(&order_label(), &tx(Some("## old label")), "", &config).unwrap();
        assert_eq!(
            out.warnings,
            vec![Warning::AlreadyLabeled {
                separator: "##".to_string()
            }]
        );

        // A separator without a following space is not a label marker.
        let out = compose(&order_label(), &tx(Some("ticket ##42")), "", &config).unwrap();
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn unmatched_label_composes_nothing() {
        let matched = FinalizedMatch {
            label: order_label(),
            transaction: None,
        };
        assert_eq!(
            compose_match(&matched, "", &LabelConfig::default()).unwrap(),
            None
        );
    }

    #[test]
    fn new_memo_extends_previous_memo_exactly() {
        let matched = FinalizedMatch {
            label: order_label(),
            transaction: Some(tx(Some("gift"))),
        };
        let out = compose_match(&matched, "AMZ", &LabelConfig::default())
            .unwrap()
            .unwrap();
        let suffix = render::render_unbounded(&order_label().fragments);
        assert_eq!(out.appended, format!("@@ AMZ {suffix}"));
        assert_eq!(out.new_memo, format!("gift {}", out.appended));
    }

    #[test]
    fn surrounding_whitespace_in_memo_is_kept() {
        let mug = label(vec![Fragment::shrinkable("Mug")]);
        let config = LabelConfig::default();

        let out = compose(&mug, &tx(Some(" gift")), "", &config).unwrap();
        assert_eq!(out.new_memo, " gift @@ Mug");
        assert_eq!(out.appended, "@@ Mug");

        let out = compose(&mug, &tx(Some("gift ")), "", &config).unwrap();
        assert_eq!(out.new_memo, "gift @@ Mug");
        assert_eq!(out.appended, "@@ Mug");

        let out = compose(&mug, &tx(Some("   ")), "", &config).unwrap();
        assert_eq!(out.new_memo, "   @@ Mug");
    }

    #[test]
    fn full_memo_is_left_alone() {
        let existing = format!(" {}", "x".repeat(199));
        let out = compose(&order_label(), &tx(Some(&existing)), "", &LabelConfig::default())
            .unwrap();
        assert_eq!(out.new_memo, existing);
        assert_eq!(out.appended, "");
    }

    #[test]
    fn memo_over_the_limit_is_cut_and_nothing_appended() {
        let existing = "y".repeat(205);
        let out = compose(&order_label(), &tx(Some(&existing)), "", &LabelConfig::default())
            .unwrap();
        assert_eq!(out.new_memo, format!("{}…", "y".repeat(199)));
        assert_eq!(out.appended, "");
        assert!(matches!(
            out.warnings.as_slice(),
            [Warning::InsufficientSpace { remaining: 0, .. }]
        ));
    }

    #[test]
    fn warning_display() {
        let w = Warning::InsufficientSpace {
            remaining: 3,
            needed: 40,
        };
        assert_eq!(w.to_string(), "only 3 characters left in memo, label needs 40");
    }
}
