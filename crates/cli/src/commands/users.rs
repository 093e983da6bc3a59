//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! # List registered usernames in file order
//! bookstall users list
//!
//! # Register a user, refusing a taken username
//! bookstall users add -u alice -p secret
//! ```

use std::io::Write;
use std::path::Path;

use bookstall_core::UserRecord;
use bookstall_storefront::db::{RepositoryError, UserRepository};

use super::{CommandError, ensure_data_dir, required};

/// Write every stored username to `out`, one per line.
///
/// # Errors
///
/// Returns `CommandError::Repository` if `users.txt` exists but cannot be read.
pub async fn list(data_dir: &Path, out: &mut impl Write) -> Result<usize, CommandError> {
    let users = UserRepository::in_dir(data_dir).list().await?;

    for user in &users {
        writeln!(out, "{}", user.username).map_err(CommandError::Output)?;
    }

    tracing::info!("{} user record(s)", users.len());
    Ok(users.len())
}

/// Register a new user.
///
/// # Errors
///
/// Returns `CommandError::EmptyArgument` for a blank username or password.
/// Returns `CommandError::UserExists` if the username is taken.
pub async fn add(data_dir: &Path, username: &str, password: &str) -> Result<(), CommandError> {
    let username = required("username", username)?;
    let password = required("password", password)?;

    ensure_data_dir(data_dir).await?;
    let repo = UserRepository::in_dir(data_dir);
    let user = UserRecord::new(username.as_str(), password.as_str());

    repo.create(&user).await.map_err(|e| match e {
        RepositoryError::Conflict(_) => CommandError::UserExists(user.username.clone()),
        other => CommandError::Repository(other),
    })?;

    tracing::info!(
        "User created: {} ({})",
        user.username,
        repo.path().display()
    );
    Ok(())
}
