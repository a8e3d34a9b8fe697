pub mod compose;
pub mod config;
pub mod label;
pub mod matched;
pub mod money;
pub mod render;
pub mod transaction;

pub use compose::{compose, compose_match, ComposedMemo, Warning};
pub use config::{ConfigError, LabelConfig, ELLIPSIS, MAX_MEMO_LENGTH};
pub use label::{Fragment, Label, OverflowPolicy};
pub use matched::{FinalizedMatch, MatchCandidateSet};
pub use money::Money;
pub use render::{render, render_unbounded, RenderError};
pub use transaction::{ClearedState, LedgerTransaction};
