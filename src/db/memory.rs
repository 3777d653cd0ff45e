//! In-process user store, used by tests and local experiments.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

use super::{NewUser, UserRow, UserStore};

#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<Mutex<HashMap<String, UserRow>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.lock().map(|u| u.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::Internal(anyhow::anyhow!("user store lock poisoned"))
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> AppResult<UserRow> {
        let mut users = self.users.lock().map_err(poisoned)?;
        if users.contains_key(&user.email) {
            return Err(AppError::Conflict);
        }
        let row = UserRow {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email.clone(),
            password_hash: user.password_hash,
            role: user.role.as_str().to_string(),
            created_at: Utc::now(),
        };
        users.insert(user.email, row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRow>> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.get(email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ada".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::User,
        }
    }

    #[tokio::test]
    async fn create_then_find() {
        let store = MemoryUserStore::new();
        let row = store.create(new_user("a@b.co")).await.unwrap();
        let found = store.find_by_email("a@b.co").await.unwrap().unwrap();
        assert_eq!(found.id, row.id);
        assert_eq!(found.role, "user");
        assert!(store.find_by_email("x@b.co").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = MemoryUserStore::new();
        store.create(new_user("a@b.co")).await.unwrap();
        let err = store.create(new_user("a@b.co")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict));
        assert_eq!(store.len(), 1);
    }
}
