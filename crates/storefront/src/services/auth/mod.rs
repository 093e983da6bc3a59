//! Authentication service.
//!
//! Plain username/password accounts stored in `users.txt`. Passwords are
//! compared as stored; there is no hashing and no session.

mod error;

pub use error::AuthError;

use bookstall_core::{Required, UserRecord};

use crate::db::{RepositoryError, UserRepository};

/// Authentication service.
///
/// Handles user registration and login.
pub struct AuthService<'a> {
    users: &'a UserRepository,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a UserRepository) -> Self {
        Self { users }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserAlreadyExists` if the username is already registered.
    /// Returns `AuthError::Repository` if the user file cannot be read or written.
    pub async fn register(
        &self,
        username: &Required,
        password: &Required,
    ) -> Result<UserRecord, AuthError> {
        let user = UserRecord::new(username.as_str(), password.as_str());

        self.users.create(&user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::Repository(other),
        })?;

        tracing::info!(username = %user.username, "user registered");
        Ok(user)
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown or the password differs.
    /// Returns `AuthError::Repository` if the user file cannot be read.
    pub async fn login(
        &self,
        username: &Required,
        password: &Required,
    ) -> Result<UserRecord, AuthError> {
        let stored = self
            .users
            .get_password(username.as_str())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if stored != password.as_str() {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(UserRecord::new(username.as_str(), stored))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn field(s: &str) -> Required {
        Required::parse(s).unwrap()
    }

    fn repo_with(content: &str) -> (tempfile::TempDir, UserRepository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = UserRepository::in_dir(dir.path());
        std::fs::write(repo.path(), content).unwrap();
        (dir, repo)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (_dir, repo) = repo_with("");
        let auth = AuthService::new(&repo);

        auth.register(&field("carol"), &field("y")).await.unwrap();
        let user = auth.login(&field("carol"), &field("y")).await.unwrap();

        assert_eq!(user.username, "carol");
    }

    #[tokio::test]
    async fn test_register_existing_keeps_password() {
        let (_dir, repo) = repo_with("alice:secret\n");
        let auth = AuthService::new(&repo);

        let err = auth
            .register(&field("alice"), &field("x"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::UserAlreadyExists));
        assert_eq!(
            repo.get_password("alice").await.unwrap().as_deref(),
            Some("secret")
        );
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (_dir, repo) = repo_with("alice:secret\n");
        let auth = AuthService::new(&repo);

        let err = auth
            .login(&field("alice"), &field("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let (_dir, repo) = repo_with("alice:secret\n");
        let auth = AuthService::new(&repo);

        let err = auth
            .login(&field("mallory"), &field("secret"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_with_no_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = UserRepository::in_dir(dir.path());
        let auth = AuthService::new(&repo);

        let err = auth
            .login(&field("alice"), &field("secret"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}
