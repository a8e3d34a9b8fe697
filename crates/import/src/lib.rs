pub mod match_engine;
pub mod parsed;

pub use match_engine::{resolve, MatchEngine, MatchSummary};
pub use parsed::{parse_labels_json, AmazonOrder, ParseError, ParsedLabel, TargetOrder, YnabRecord};
