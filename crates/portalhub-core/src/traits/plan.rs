//! Plan assignment lookup.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::UserId;

/// Maps users to the plan identifier they are subscribed to.
#[async_trait]
pub trait PlanAssignments: Send + Sync + std::fmt::Debug + 'static {
    /// The raw plan identifier assigned to `user_id` (e.g. `"pro"`).
    ///
    /// Returns a not-found error when the user does not exist.
    async fn plan_for_user(&self, user_id: UserId) -> AppResult<String>;

    /// Every active user that should be included in a usage rollup.
    async fn active_users(&self) -> AppResult<Vec<UserId>>;
}
