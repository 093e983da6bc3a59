//! Flat-file record storage for the storefront.
//!
//! # Data directory
//!
//! Every record lives in a plain-text file, one record per line:
//!
//! ## Files
//!
//! - `users.txt` - `username:password`, written by registration
//! - `orders.txt` - `book|name|phone`, written by checkout (never read back)
//!
//! Files are append-only. Lookups re-read the whole file on every call, so
//! each request sees the latest on-disk state. Writes to a file are
//! serialized through that file's [`FlatFile`] mutex so concurrent requests
//! never interleave partial lines.
//!
//! The data directory itself is not created here; the storefront binary and
//! the CLI create it before opening any repository.

pub mod orders;
pub mod users;

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, MutexGuard};

pub use orders::OrderRepository;
pub use users::UserRepository;

/// File name of the user store inside the data directory.
pub const USERS_FILE: &str = "users.txt";

/// File name of the order log inside the data directory.
pub const ORDERS_FILE: &str = "orders.txt";

/// Errors that can occur during repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Reading or appending the backing file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Constraint violation (e.g., duplicate username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Proof that the caller holds a [`FlatFile`]'s write lock.
pub type WriteGuard<'a> = MutexGuard<'a, ()>;

/// A newline-delimited text file with serialized appends.
#[derive(Debug)]
pub struct FlatFile {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FlatFile {
    /// Create a handle for the file at `path`. The file need not exist.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every line of the file.
    ///
    /// A missing file reads as empty. `\n`, `\r\n` and a lone `\r` all end
    /// a line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` for any other read failure, including
    /// content that is not valid UTF-8.
    pub async fn read_lines(&self) -> Result<Vec<String>, RepositoryError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(split_lines(&content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(RepositoryError::io(&self.path, e)),
        }
    }

    /// Acquire the write lock for a read-check-append sequence.
    pub async fn lock(&self) -> WriteGuard<'_> {
        self.write_lock.lock().await
    }

    /// Append one line, taking the write lock for the duration.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be opened or written.
    pub async fn append_line(&self, line: &str) -> Result<(), RepositoryError> {
        let guard = self.lock().await;
        self.append_locked(&guard, line).await
    }

    /// Append one line while the caller already holds the write lock.
    ///
    /// The file is opened in append mode and created if absent; existing
    /// content is never rewritten. `line` is written with a single
    /// `write_all` and must carry its own trailing newline.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be opened or written.
    pub async fn append_locked(
        &self,
        _guard: &WriteGuard<'_>,
        line: &str,
    ) -> Result<(), RepositoryError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| RepositoryError::io(&self.path, e))?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| RepositoryError::io(&self.path, e))?;
        file.flush()
            .await
            .map_err(|e| RepositoryError::io(&self.path, e))?;
        file.sync_data()
            .await
            .map_err(|e| RepositoryError::io(&self.path, e))?;

        Ok(())
    }
}

/// Split text on `\n`, `\r\n` or `\r`. A trailing terminator does not
/// start an extra empty line.
fn split_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = content;

    while !rest.is_empty() {
        let Some(end) = rest.find(['\r', '\n']) else {
            lines.push(rest.to_owned());
            break;
        };
        let (line, tail) = rest.split_at(end);
        lines.push(line.to_owned());
        rest = tail
            .strip_prefix("\r\n")
            .or_else(|| tail.get(1..))
            .unwrap_or_default();
    }

    lines
}
