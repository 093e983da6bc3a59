//! Command implementations.
//!
//! Each command opens the repositories it needs over the data directory and
//! creates that directory first if it is missing.

pub mod orders;
pub mod users;

use std::path::Path;

use bookstall_core::{FieldError, Required};
use bookstall_storefront::db::RepositoryError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// An argument was empty after trimming.
    #[error("{0} cannot be empty")]
    EmptyArgument(&'static str),

    /// The data directory could not be created.
    #[error("cannot create data directory {path}: {source}")]
    DataDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// User already exists.
    #[error("user already exists: {0}")]
    UserExists(String),

    /// Writing command output failed.
    #[error("cannot write output: {0}")]
    Output(#[source] std::io::Error),

    /// Reading or writing a record file failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Parse a required argument, naming it in the error.
fn required(name: &'static str, value: &str) -> Result<Required, CommandError> {
    Required::parse(value).map_err(|_: FieldError| CommandError::EmptyArgument(name))
}

/// Create the data directory if it does not exist.
async fn ensure_data_dir(data_dir: &Path) -> Result<(), CommandError> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|source| CommandError::DataDir {
            path: data_dir.display().to_string(),
            source,
        })
}
