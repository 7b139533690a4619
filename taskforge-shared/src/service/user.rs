/// User domain service
///
/// Layers registration rules on top of [`UserRepository`]: email and
/// username must be unused among live users, and the plaintext password is
/// replaced by an Argon2id hash before anything reaches storage.
///
/// The uniqueness pre-checks are advisory. Two racing registrations with
/// the same email can both pass them; the partial unique index underneath
/// is what actually decides, and its violation surfaces as the same
/// `Conflict`.

use std::sync::Arc;
use uuid::Uuid;

use crate::auth::password;
use crate::error::{Error, Result};
use crate::models::{CreateUser, User};
use crate::repository::UserRepository;

/// Service for user accounts
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Registers a new user
    ///
    /// # Errors
    ///
    /// - `Conflict` if the email or username is already registered
    /// - `Internal` if hashing or the store fails
    pub async fn create_user(&self, data: CreateUser) -> Result<User> {
        if self.repo.get_by_email(&data.email).await.is_ok() {
            return Err(Error::Conflict(
                "user with this email already exists".to_string(),
            ));
        }

        if self.repo.get_by_username(&data.username).await.is_ok() {
            return Err(Error::Conflict(
                "user with this username already exists".to_string(),
            ));
        }

        let password_hash = password::hash_password(&data.password)?;

        let now = chrono::Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: data.username,
            email: data.email,
            password_hash,
            first_name: data.first_name,
            last_name: data.last_name,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.repo.create(&user).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<User> {
        self.repo.get_by_id(id).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<User> {
        self.repo.get_by_email(email).await
    }

    pub async fn get_by_username(&self, username: &str) -> Result<User> {
        self.repo.get_by_username(username).await
    }

    /// Persists the record as given; the caller merges mutable fields
    /// (first/last name) before calling
    pub async fn update_user(&self, user: &User) -> Result<User> {
        self.repo.update(user).await
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<()> {
        self.repo.delete(id).await
    }

    pub async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        self.repo.list(limit, offset).await
    }

    /// Whether `candidate` hashes to `hash`
    ///
    /// Returns false on mismatch or on a malformed hash; never errors.
    pub fn verify_password(&self, hash: &str, candidate: &str) -> bool {
        password::verify_password(candidate, hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryStore::new()))
    }

    fn alice() -> CreateUser {
        CreateUser {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "pw123456".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_assigns_id_and_hashes_password() {
        let svc = service();
        let user = svc.create_user(alice()).await.unwrap();

        assert!(!user.id.is_nil());
        assert_ne!(user.password_hash, "pw123456");
        assert!(svc.verify_password(&user.password_hash, "pw123456"));
        assert!(!svc.verify_password(&user.password_hash, "wrong"));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict_regardless_of_username() {
        let svc = service();
        svc.create_user(alice()).await.unwrap();

        let mut dup = alice();
        dup.username = "completely-different".to_string();
        let err = svc.create_user(dup).await.unwrap_err();

        match err {
            Error::Conflict(msg) => assert!(msg.contains("already exists")),
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let svc = service();
        svc.create_user(alice()).await.unwrap();

        let mut dup = alice();
        dup.email = "other@x.com".to_string();
        let err = svc.create_user(dup).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_by_email_and_username() {
        let svc = service();
        let created = svc.create_user(alice()).await.unwrap();

        assert_eq!(svc.get_by_email("a@x.com").await.unwrap().id, created.id);
        assert_eq!(svc.get_by_username("alice").await.unwrap().id, created.id);
        assert!(matches!(
            svc.get_by_email("nobody@x.com").await.unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_update_persists_name_fields() {
        let svc = service();
        let mut user = svc.create_user(alice()).await.unwrap();

        user.first_name = "Alicia".to_string();
        user.last_name = "Jones".to_string();
        svc.update_user(&user).await.unwrap();

        let fetched = svc.get_by_id(user.id).await.unwrap();
        assert_eq!(fetched.first_name, "Alicia");
        assert_eq!(fetched.last_name, "Jones");
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let svc = service();
        let user = svc.create_user(alice()).await.unwrap();

        svc.delete_user(user.id).await.unwrap();
        assert!(matches!(
            svc.get_by_id(user.id).await.unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_list_pagination_covers_all_records() {
        let svc = service();
        for i in 0..5 {
            svc.create_user(CreateUser {
                username: format!("user{}", i),
                email: format!("u{}@x.com", i),
                password: "pw123456".to_string(),
                first_name: String::new(),
                last_name: String::new(),
            })
            .await
            .unwrap();
        }

        let all = svc.list_users(5, 0).await.unwrap();
        assert_eq!(all.len(), 5);

        // min(limit, total - offset)
        let first = svc.list_users(3, 0).await.unwrap();
        let rest = svc.list_users(2, 3).await.unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(rest.len(), 2);

        let mut combined: Vec<Uuid> =
            first.iter().chain(rest.iter()).map(|u| u.id).collect();
        let mut expected: Vec<Uuid> = all.iter().map(|u| u.id).collect();
        combined.sort();
        expected.sort();
        assert_eq!(combined, expected);

        let past_end = svc.list_users(10, 4).await.unwrap();
        assert_eq!(past_end.len(), 1);
    }
}
