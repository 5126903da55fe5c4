//! Quota classification levels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How close a user is to a ceiling. Declared in ascending severity so
/// the derived `Ord` matches normal < warning < critical < exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaLevel {
    /// Below 80% of the limit.
    Normal,
    /// From 80% up to 90%.
    Warning,
    /// From 90% up to 100%.
    Critical,
    /// At or above 100%.
    Exceeded,
}

impl QuotaLevel {
    /// Return the level as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Critical => "critical",
            Self::Exceeded => "exceeded",
        }
    }
}

impl fmt::Display for QuotaLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
