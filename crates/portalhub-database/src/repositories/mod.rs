//! Repository implementations backing the quota engine's collaborator traits.

pub mod notification;
pub mod rollup;
pub mod usage;
pub mod user;

pub use notification::NotificationRepository;
pub use rollup::RollupRepository;
pub use usage::UsageRepository;
pub use user::UserPlanRepository;

/// Convert a non-negative database count into `u64`, clamping stray
/// negatives to zero.
pub(crate) fn to_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}
