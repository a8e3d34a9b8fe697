use std::collections::HashSet;

use memolabel_core::{FinalizedMatch, Label, LabelConfig, LedgerTransaction, MatchCandidateSet};
use serde::{Deserialize, Serialize};

pub struct MatchEngine {
    pub date_tolerance_days: i64,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self {
            date_tolerance_days: memolabel_core::config::DATE_TOLERANCE_DAYS,
        }
    }
}

impl MatchEngine {
    pub fn new(date_tolerance_days: i64) -> Self {
        Self { date_tolerance_days }
    }

    pub fn from_config(config: &LabelConfig) -> Self {
        Self::new(config.date_tolerance_days)
    }

    /// Transactions with exactly the label's amount, dated within the
    /// tolerance window, closest date first. Equal distances keep input order.
    pub fn find_candidates(
        &self,
        label: &Label,
        transactions: &[LedgerTransaction],
    ) -> Vec<LedgerTransaction> {
        let mut scored: Vec<(i64, &LedgerTransaction)> = transactions
            .iter()
            .filter(|tx| tx.amount() == label.amount)
            .map(|tx| (date_distance(label, tx), tx))
            .filter(|(days, _)| *days <= self.date_tolerance_days)
            .collect();

        // `sort_by_key` is stable.
        scored.sort_by_key(|(days, _)| *days);
        scored.into_iter().map(|(_, tx)| tx.clone()).collect()
    }

    /// One candidate set per label, in label order.
    pub fn candidate_sets(
        &self,
        labels: &[Label],
        transactions: &[LedgerTransaction],
    ) -> Vec<MatchCandidateSet> {
        labels
            .iter()
            .map(|label| MatchCandidateSet {
                label: label.clone(),
                candidates: self.find_candidates(label, transactions),
            })
            .collect()
    }

    /// Candidate generation followed by [`resolve`].
    pub fn match_labels(
        &self,
        labels: &[Label],
        transactions: &[LedgerTransaction],
    ) -> Vec<FinalizedMatch> {
        resolve(self.candidate_sets(labels, transactions))
    }
}

fn date_distance(label: &Label, tx: &LedgerTransaction) -> i64 {
    (label.date - tx.date).num_days().abs()
}

/// Greedy first-fit assignment in input order.
///
/// Each label takes its closest candidate not already claimed by an earlier
/// label. There is no backtracking: an earlier label keeps its transaction
/// even when a later label would have been a closer match, so the outcome
/// depends on the order of `sets`.
pub fn resolve(sets: Vec<MatchCandidateSet>) -> Vec<FinalizedMatch> {
    let mut claimed: HashSet<String> = HashSet::new();

    let matches: Vec<FinalizedMatch> = sets
        .into_iter()
        .map(|set| {
            let winner = set
                .candidates
                .into_iter()
                .find(|tx| !claimed.contains(&tx.id));
            if let Some(tx) = &winner {
                claimed.insert(tx.id.clone());
            }
            tracing::debug!(
                label = %set.label.id,
                transaction = winner.as_ref().map(|tx| tx.id.as_str()).unwrap_or("-"),
                "resolved label"
            );
            FinalizedMatch {
                label: set.label,
                transaction: winner,
            }
        })
        .collect();

    let summary = MatchSummary::from_matches(&matches);
    tracing::info!(
        matched = summary.matched,
        unmatched = summary.unmatched,
        "label assignment complete"
    );
    matches
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub matched: usize,
    pub unmatched: usize,
}

impl MatchSummary {
    pub fn from_matches(matches: &[FinalizedMatch]) -> Self {
        let matched = matches.iter().filter(|m| m.is_matched()).count();
        Self {
            matched,
            unmatched: matches.len() - matched,
        }
    }
}
