use crate::core::errors::WhoOwesError;
use crate::core::models::{AppUser, Group};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    users_by_email: Arc<RwLock<HashMap<String, AppUser>>>,
    groups: Arc<RwLock<HashMap<String, Group>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_user(&self, user: AppUser) -> Result<AppUser, WhoOwesError> {
        let mut users_by_email = self.users_by_email.write().await;
        match users_by_email.entry(email_key(&user.email)) {
            Entry::Occupied(_) => Err(WhoOwesError::EmailAlreadyRegistered(user.email)),
            Entry::Vacant(slot) => Ok(slot.insert(user).clone()),
        }
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<AppUser>, WhoOwesError> {
        let users_by_email = self.users_by_email.read().await;
        Ok(users_by_email.get(&email_key(email)).cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, WhoOwesError> {
        let users_by_email = self.users_by_email.read().await;
        Ok(users_by_email.contains_key(&email_key(email)))
    }

    async fn add_group(&self, group: Group) -> Result<Group, WhoOwesError> {
        let mut groups = self.groups.write().await;
        match groups.entry(group.id.clone()) {
            Entry::Occupied(_) => Err(WhoOwesError::StorageError(format!(
                "Group with id {} already exists",
                group.id
            ))),
            Entry::Vacant(slot) => Ok(slot.insert(group).clone()),
        }
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, WhoOwesError> {
        let groups = self.groups.read().await;
        Ok(groups.get(group_id).cloned())
    }

    async fn get_groups_by_creator(&self, user_id: &str) -> Result<Vec<Group>, WhoOwesError> {
        let groups = self.groups.read().await;
        Ok(groups
            .values()
            .filter(|g| g.creator_user_id == user_id)
            .cloned()
            .collect())
    }

    async fn modify_group<T, F>(&self, group_id: &str, mutate: F) -> Result<T, WhoOwesError>
    where
        T: Send,
        F: FnOnce(&mut Group) -> Result<T, WhoOwesError> + Send,
    {
        let mut groups = self.groups.write().await;
        let stored = groups
            .get_mut(group_id)
            .ok_or_else(|| WhoOwesError::GroupNotFound(group_id.to_string()))?;

        let mut draft = stored.clone();
        let outcome = mutate(&mut draft)?;
        *stored = draft;
        Ok(outcome)
    }

    async fn delete_group<F>(&self, group_id: &str, check: F) -> Result<(), WhoOwesError>
    where
        F: FnOnce(&Group) -> Result<(), WhoOwesError> + Send,
    {
        let mut groups = self.groups.write().await;
        let group = groups
            .get(group_id)
            .ok_or_else(|| WhoOwesError::GroupNotFound(group_id.to_string()))?;
        check(group)?;
        groups.remove(group_id);
        Ok(())
    }
}
