//! User service: create accounts and authenticate credentials.

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::auth::PasswordHasher;
use crate::db::{NewUser, UserStore};
use crate::error::{AppError, AppResult};
use crate::models::{PublicUser, UserRole};

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    /// Verified against on unknown emails so both signin failures cost one argon2 run.
    dummy_hash: Arc<OnceCell<String>>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Hash and persist a new user. `Conflict` if the email is taken,
    /// including when a concurrent signup wins the insert.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> AppResult<PublicUser> {
        if self.store.find_by_email(email).await?.is_some() {
            debug!(email = %email, "signup rejected: email already registered");
            return Err(AppError::Conflict);
        }

        let password_hash = self.hash(password.to_string()).await?;
        let row = self
            .store
            .create(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                role,
            })
            .await?;

        info!(user_id = %row.id, "user created");
        row.to_public()
    }

    /// Look up by email and verify the password.
    pub async fn authenticate_user(&self, email: &str, password: &str) -> AppResult<PublicUser> {
        let Some(row) = self.store.find_by_email(email).await? else {
            let dummy = self.dummy_hash().await?;
            self.verify(password.to_string(), dummy).await?;
            warn!(email = %email, "signin failed: user not found");
            return Err(AppError::UserNotFound);
        };

        if !self
            .verify(password.to_string(), row.password_hash.clone())
            .await?
        {
            warn!(user_id = %row.id, "signin failed: password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        info!(user_id = %row.id, "user authenticated");
        row.to_public()
    }

    async fn dummy_hash(&self) -> AppResult<String> {
        self.dummy_hash
            .get_or_try_init(|| self.hash(uuid::Uuid::new_v4().to_string()))
            .await
            .cloned()
    }

    async fn hash(&self, password: String) -> AppResult<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("hash task: {}", e)))?
    }

    async fn verify(&self, password: String, hash: String) -> AppResult<bool> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("verify task: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryUserStore;

    fn service() -> (UserService, MemoryUserStore) {
        let store = MemoryUserStore::new();
        (UserService::new(Arc::new(store.clone())), store)
    }

    #[tokio::test]
    async fn create_user_returns_public_view() {
        let (svc, store) = service();
        let user = svc
            .create_user("Ada", "ada@example.com", "password123", UserRole::User)
            .await
            .unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.role, UserRole::User);

        let row = store.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert_ne!(row.password_hash, "password123");
    }

    #[tokio::test]
    async fn create_user_conflicts_on_existing_email() {
        let (svc, store) = service();
        svc.create_user("Ada", "ada@example.com", "password123", UserRole::User)
            .await
            .unwrap();
        let err = svc
            .create_user("Other", "ada@example.com", "different-pw", UserRole::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn authenticate_distinguishes_failures_internally() {
        let (svc, _) = service();
        svc.create_user("Ada", "ada@example.com", "password123", UserRole::User)
            .await
            .unwrap();

        let ok = svc.authenticate_user("ada@example.com", "password123").await;
        tokio_test::assert_ok!(ok);

        let missing = svc.authenticate_user("nobody@example.com", "password123").await;
        assert!(matches!(missing, Err(AppError::UserNotFound)));

        let wrong = svc.authenticate_user("ada@example.com", "nope").await;
        assert!(matches!(wrong, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn unknown_email_still_runs_password_verification() {
        let (svc, _) = service();
        assert!(svc.dummy_hash.get().is_none());

        let missing = svc.authenticate_user("nobody@example.com", "password123").await;
        assert!(matches!(missing, Err(AppError::UserNotFound)));

        let dummy = svc.dummy_hash.get().expect("dummy hash should be initialized");
        assert!(dummy.starts_with("$argon2"));
        assert!(!svc.hasher.verify("password123", dummy).unwrap());
    }
}
