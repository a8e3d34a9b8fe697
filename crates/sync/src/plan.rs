use memolabel_core::{compose_match, FinalizedMatch, LabelConfig, RenderError, Warning};
use serde::{Deserialize, Serialize};

/// A memo change ready to send to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedUpdate {
    pub label_id: String,
    pub transaction_id: String,
    pub previous_memo: String,
    pub new_memo: String,
    /// The part of `new_memo` that follows `previous_memo`.
    pub label_appended: String,
    #[serde(default)]
    pub warnings: Vec<Warning>,
}

impl PlannedUpdate {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Compose a memo for every matched label. Unmatched labels are skipped;
/// a render failure aborts the whole plan.
pub fn plan_updates(
    matches: &[FinalizedMatch],
    config: &LabelConfig,
) -> Result<Vec<PlannedUpdate>, RenderError> {
    let mut updates = Vec::with_capacity(matches.len());
    for matched in matches {
        let (Some(tx), Some(composed)) = (
            matched.transaction.as_ref(),
            compose_match(matched, &config.prefix, config)?,
        ) else {
            tracing::debug!(label = %matched.label.id, "no transaction, nothing to update");
            continue;
        };
        updates.push(PlannedUpdate {
            label_id: matched.label.id.clone(),
            transaction_id: tx.id.clone(),
            previous_memo: tx.existing_memo().to_string(),
            new_memo: composed.new_memo,
            label_appended: composed.appended,
            warnings: composed.warnings,
        });
    }
    tracing::info!(
        updates = updates.len(),
        with_warnings = updates.iter().filter(|u| u.has_warnings()).count(),
        "planned memo updates"
    );
    Ok(updates)
}
