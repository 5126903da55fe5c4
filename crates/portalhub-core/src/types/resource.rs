//! Quota-bearing resource types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A resource whose consumption is capped by the user's plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Collection portals owned by the user.
    Portals,
    /// Total bytes of every file the user owns, directly or through a portal.
    Storage,
    /// Team members invited into the user's workspace.
    TeamMembers,
    /// Custom domains attached to the user's portals.
    CustomDomains,
}

impl ResourceType {
    /// Every resource type, in display order.
    pub const ALL: [ResourceType; 4] = [
        Self::Portals,
        Self::Storage,
        Self::TeamMembers,
        Self::CustomDomains,
    ];

    /// Return the resource type as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Portals => "portals",
            Self::Storage => "storage",
            Self::TeamMembers => "team_members",
            Self::CustomDomains => "custom_domains",
        }
    }

    /// Unit the resource is measured in.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Storage => "bytes",
            _ => "items",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "portals" => Ok(Self::Portals),
            "storage" => Ok(Self::Storage),
            "team_members" => Ok(Self::TeamMembers),
            "custom_domains" => Ok(Self::CustomDomains),
            other => Err(AppError::validation(format!(
                "Unknown resource type: '{other}'"
            ))),
        }
    }
}
