use crate::core::errors::WhoOwesError;
use crate::core::models::{AppUser, Group};
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Fails with `EmailAlreadyRegistered` when the email is taken, ignoring case.
    async fn create_user(&self, user: AppUser) -> Result<AppUser, WhoOwesError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<AppUser>, WhoOwesError>;
    async fn email_exists(&self, email: &str) -> Result<bool, WhoOwesError>;

    async fn add_group(&self, group: Group) -> Result<Group, WhoOwesError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, WhoOwesError>;
    async fn get_groups_by_creator(&self, user_id: &str) -> Result<Vec<Group>, WhoOwesError>;

    /// Runs `mutate` against the stored group with no other writer in between.
    /// The change is kept only when `mutate` returns `Ok`; a missing group
    /// fails with `GroupNotFound`.
    async fn modify_group<T, F>(&self, group_id: &str, mutate: F) -> Result<T, WhoOwesError>
    where
        T: Send,
        F: FnOnce(&mut Group) -> Result<T, WhoOwesError> + Send;

    /// Removes the group if `check` passes, under the same exclusive access as `modify_group`.
    async fn delete_group<F>(&self, group_id: &str, check: F) -> Result<(), WhoOwesError>
    where
        F: FnOnce(&Group) -> Result<(), WhoOwesError> + Send;
}

pub mod in_memory;
