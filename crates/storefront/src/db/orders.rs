//! Order log backed by `orders.txt`.

use std::path::{Path, PathBuf};

use bookstall_core::OrderRecord;

use super::{FlatFile, ORDERS_FILE, RepositoryError};

/// Repository for the write-only order log.
#[derive(Debug)]
pub struct OrderRepository {
    file: FlatFile,
}

impl OrderRepository {
    /// Create a repository over the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: FlatFile::new(path),
        }
    }

    /// Create a repository over `orders.txt` inside `data_dir`.
    #[must_use]
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(ORDERS_FILE))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Append one order. Identical orders are appended again, never merged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be opened or written.
    pub async fn append(&self, order: &OrderRecord) -> Result<(), RepositoryError> {
        self.file.append_line(&order.to_line()).await?;
        tracing::debug!(book = %order.book, "order appended");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_writes_pipe_delimited_line() {
        let dir = tempfile::tempdir().unwrap();
        let repo = OrderRepository::in_dir(dir.path());

        repo.append(&OrderRecord::new("Dune", "Ann", "555"))
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(repo.path()).unwrap(),
            "Dune|Ann|555\n"
        );
    }

    #[tokio::test]
    async fn test_identical_orders_are_not_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let repo = OrderRepository::in_dir(dir.path());
        let order = OrderRecord::new("Dune", "Ann", "555");

        repo.append(&order).await.unwrap();
        repo.append(&order).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(repo.path()).unwrap(),
            "Dune|Ann|555\nDune|Ann|555\n"
        );
    }
}
