//! Plan tier enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use portalhub_core::error::AppError;

/// Subscription tier. Variants are declared in ascending order, so the
/// derived `Ord` is the upgrade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    /// Free tier.
    Free,
    /// Paid individual tier.
    Pro,
    /// Paid team tier.
    Team,
    /// Enterprise tier (no ceilings).
    Enterprise,
}

impl PlanTier {
    /// Every tier, lowest first.
    pub const ALL: [PlanTier; 4] = [Self::Free, Self::Pro, Self::Team, Self::Enterprise];

    /// Return the tier identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Team => "team",
            Self::Enterprise => "enterprise",
        }
    }

    /// Display name for upgrade prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Pro => "Pro",
            Self::Team => "Team",
            Self::Enterprise => "Enterprise",
        }
    }

    /// The next tier up; the top tier maps to itself.
    pub fn next(&self) -> PlanTier {
        match self {
            Self::Free => Self::Pro,
            Self::Pro => Self::Team,
            Self::Team | Self::Enterprise => Self::Enterprise,
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlanTier {
    type Err = AppError;

    /// Unknown identifiers are a configuration error, never a silent
    /// downgrade to the free tier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            "team" => Ok(Self::Team),
            "enterprise" => Ok(Self::Enterprise),
            _ => Err(AppError::configuration(format!("Unknown plan identifier: '{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use portalhub_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_ordering_is_upgrade_order() {
        assert!(PlanTier::Free < PlanTier::Pro);
        assert!(PlanTier::Pro < PlanTier::Team);
        assert!(PlanTier::Team < PlanTier::Enterprise);
    }

    #[test]
    fn test_next_caps_at_top() {
        assert_eq!(PlanTier::Free.next(), PlanTier::Pro);
        assert_eq!(PlanTier::Team.next(), PlanTier::Enterprise);
        assert_eq!(PlanTier::Enterprise.next(), PlanTier::Enterprise);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" Pro ".parse::<PlanTier>().ok(), Some(PlanTier::Pro));
    }

    #[test]
    fn test_unknown_plan_is_configuration_error() {
        let err = "platinum".parse::<PlanTier>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
