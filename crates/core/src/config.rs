use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hard memo field limit of the budgeting ledger, in characters.
pub const MAX_MEMO_LENGTH: usize = 200;
pub const DATE_TOLERANCE_DAYS: i64 = 10;
pub const LOW_SPACE_WARNING_THRESHOLD: usize = 15;
pub const SEPARATOR: &str = "@@";
/// Separators written by earlier releases, still recognised when checking
/// whether a memo already carries a label.
pub const LEGACY_SEPARATORS: &[&str] = &["##"];
pub const ELLIPSIS: char = '…';

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunables passed explicitly into matching and composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub max_memo_length: usize,
    pub date_tolerance_days: i64,
    pub low_space_warning_threshold: usize,
    pub separator: String,
    pub legacy_separators: Vec<String>,
    pub prefix: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            max_memo_length: MAX_MEMO_LENGTH,
            date_tolerance_days: DATE_TOLERANCE_DAYS,
            low_space_warning_threshold: LOW_SPACE_WARNING_THRESHOLD,
            separator: SEPARATOR.to_string(),
            legacy_separators: LEGACY_SEPARATORS.iter().map(|s| s.to_string()).collect(),
            prefix: String::new(),
        }
    }
}

impl LabelConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let config: LabelConfig = toml::from_str(toml_content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_memo_length == 0 {
            return Err(ConfigError::Invalid("max_memo_length must be positive".into()));
        }
        if self.date_tolerance_days < 0 {
            return Err(ConfigError::Invalid(
                "date_tolerance_days must not be negative".into(),
            ));
        }
        if self.separator.trim().is_empty() {
            return Err(ConfigError::Invalid("separator must not be blank".into()));
        }
        Ok(())
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Every separator that marks a memo as already labelled.
    pub fn known_separators(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.separator.as_str())
            .chain(self.legacy_separators.iter().map(String::as_str))
    }
}
