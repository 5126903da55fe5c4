//! Plan domain entities.

pub mod definition;
pub mod feature;
pub mod tier;

pub use definition::{PlanDefinition, PlanFeatures, PlanLimits, UNLIMITED, is_unlimited};
pub use feature::Feature;
pub use tier::PlanTier;
