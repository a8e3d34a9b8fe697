use thiserror::Error;

use super::config::ELLIPSIS;
use super::label::{Fragment, OverflowPolicy};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Label cannot fit in {limit} characters: {rendered} remain after every fragment was degraded")]
    UnsatisfiableLength { limit: usize, rendered: usize },
}

/// Concatenate fragments with no length limit.
pub fn render_unbounded(fragments: &[Fragment]) -> String {
    join(&trimmed(fragments))
}

/// Length of [`render_unbounded`] without building the string.
pub fn unbounded_len(fragments: &[Fragment]) -> usize {
    rendered_len(&trimmed(fragments))
}

/// Render `fragments` into at most `limit` characters.
///
/// Degrades in two stages. The shrink pass truncates shrinkable fragments,
/// last first. If that is not enough, the force pass walks backwards
/// applying each fragment's overflow policy and re-runs the shrink pass
/// after every step, so a fragment shrunk earlier can win characters back
/// once a later one has been dropped.
pub fn render(fragments: &[Fragment], limit: usize) -> Result<String, RenderError> {
    fit(fragments, limit).map(|fitted| join(&fitted))
}

/// Same as [`render`] but returns the degraded fragments instead of the
/// joined string. Empty fragments stay in place so indices line up with
/// the input.
pub fn fit(fragments: &[Fragment], limit: usize) -> Result<Vec<Fragment>, RenderError> {
    let base = trimmed(fragments);
    if rendered_len(&base) <= limit {
        return Ok(base);
    }

    let mut current = shrink_pass(&base, limit);
    if rendered_len(&current) <= limit {
        return Ok(current);
    }

    tracing::debug!(
        limit,
        shrunk = rendered_len(&current),
        "shrinking was not enough, applying overflow policies"
    );

    // Force-degraded copy of `base`. Shrinking always restarts from here.
    let mut forced = base;
    for i in (0..forced.len()).rev() {
        let len = rendered_len(&current);
        if len <= limit {
            break;
        }
        let deficit = len - limit;

        let fragment = &mut forced[i];
        match fragment.overflow {
            OverflowPolicy::Omit => fragment.text.clear(),
            // Shrinkable text is already cut by the shrink pass as far as needed.
            OverflowPolicy::Truncate if fragment.shrinkable => continue,
            OverflowPolicy::Truncate => {
                fragment.text = truncate_by(&current[i].text, deficit);
            }
        }

        current = shrink_pass(&forced, limit);
    }

    let rendered = rendered_len(&current);
    if rendered > limit {
        return Err(RenderError::UnsatisfiableLength { limit, rendered });
    }
    Ok(current)
}

/// Number of characters `fragments` occupy once joined.
pub fn rendered_len(fragments: &[Fragment]) -> usize {
    let mut len = 0;
    let mut pending_gap = None;
    for fragment in fragments.iter().filter(|f| !f.is_empty()) {
        if let Some(gap) = pending_gap {
            len += gap;
        }
        len += char_len(&fragment.text);
        pending_gap = Some(fragment.gap_after);
    }
    len
}

fn join(fragments: &[Fragment]) -> String {
    let mut out = String::new();
    let mut pending_gap = None;
    for fragment in fragments.iter().filter(|f| !f.is_empty()) {
        if let Some(gap) = pending_gap {
            out.extend(std::iter::repeat(' ').take(gap));
        }
        out.push_str(&fragment.text);
        pending_gap = Some(fragment.gap_after);
    }
    out
}

fn trimmed(fragments: &[Fragment]) -> Vec<Fragment> {
    fragments
        .iter()
        .map(|f| Fragment {
            text: f.text.trim().to_string(),
            ..f.clone()
        })
        .collect()
}

fn shrink_pass(fragments: &[Fragment], limit: usize) -> Vec<Fragment> {
    let mut out = fragments.to_vec();
    for i in (0..out.len()).rev() {
        let len = rendered_len(&out);
        if len <= limit {
            break;
        }
        let fragment = &mut out[i];
        if fragment.shrinkable && !fragment.is_empty() {
            fragment.text = truncate_by(&fragment.text, len - limit);
        }
    }
    out
}

/// Remove `remove` characters from the end of `text`, replacing the cut
/// with an ellipsis. Trailing whitespace exposed by the cut is absorbed.
fn truncate_by(text: &str, remove: usize) -> String {
    let len = char_len(text);
    if remove == 0 {
        return text.to_string();
    }
    if remove >= len {
        return String::new();
    }
    let keep = len - remove - 1;
    let mut out: String = text.chars().take(keep).collect();
    out.truncate(out.trim_end().len());
    out.push(ELLIPSIS);
    out
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
