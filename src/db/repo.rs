use async_trait::async_trait;

use super::model::*;

/// Account storage. Email is the uniqueness key; passwords are compared
/// verbatim.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn user_exists(&self, email: &str) -> DbResult<bool>;
    async fn create_user(&self, email: &str, password: &str) -> DbResult<User>;
    async fn verify_user(&self, email: &str, password: &str) -> DbResult<User>;
}
