//! User repository backed by `users.txt`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bookstall_core::UserRecord;

use super::{FlatFile, RepositoryError, USERS_FILE};

/// Repository for user records.
#[derive(Debug)]
pub struct UserRepository {
    file: FlatFile,
}

impl UserRepository {
    /// Create a repository over the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: FlatFile::new(path),
        }
    }

    /// Create a repository over `users.txt` inside `data_dir`.
    #[must_use]
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(USERS_FILE))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Load every user as a `username -> password` mapping.
    ///
    /// A missing file yields an empty mapping. Lines without a `:` are
    /// skipped. When a username appears more than once the last line wins.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file exists but cannot be read.
    pub async fn load(&self) -> Result<HashMap<String, String>, RepositoryError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .map(|user| (user.username, user.password))
            .collect())
    }

    /// List user records in file order, duplicates included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file exists but cannot be read.
    pub async fn list(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        let lines = self.file.read_lines().await?;
        Ok(lines
            .iter()
            .filter_map(|line| UserRecord::parse_line(line))
            .collect())
    }

    /// Look up the stored password for `username`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file exists but cannot be read.
    pub async fn get_password(&self, username: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.load().await?.remove(username))
    }

    /// Append a user line without checking for an existing username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be opened or written.
    pub async fn save(&self, user: &UserRecord) -> Result<(), RepositoryError> {
        self.file.append_line(&user.to_line()).await
    }

    /// Append a user if the username is not taken.
    ///
    /// The existence check and the append run under the file's write lock,
    /// so two concurrent registrations of one name cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Io` if the file cannot be read or written.
    pub async fn create(&self, user: &UserRecord) -> Result<(), RepositoryError> {
        let guard = self.file.lock().await;

        if self.load().await?.contains_key(&user.username) {
            return Err(RepositoryError::Conflict(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        self.file.append_locked(&guard, &user.to_line()).await?;
        tracing::debug!(username = %user.username, "user appended");
        Ok(())
    }
}
