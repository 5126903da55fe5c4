//! Plan feature flags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use portalhub_core::error::AppError;

/// A boolean capability unlocked by a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Remove PortalHub branding from portals.
    WhiteLabel,
    /// Single sign-on for team members.
    Sso,
    /// Custom logo and colours on portals.
    CustomBranding,
    /// Priority support queue.
    PrioritySupport,
}

impl Feature {
    /// Return the feature identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhiteLabel => "white_label",
            Self::Sso => "sso",
            Self::CustomBranding => "custom_branding",
            Self::PrioritySupport => "priority_support",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Feature {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white_label" => Ok(Self::WhiteLabel),
            "sso" => Ok(Self::Sso),
            "custom_branding" => Ok(Self::CustomBranding),
            "priority_support" => Ok(Self::PrioritySupport),
            other => Err(AppError::validation(format!("Unknown feature: '{other}'"))),
        }
    }
}
