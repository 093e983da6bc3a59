//! Integration tests for Bookstall.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bookstall-integration-tests
//! ```
//!
//! Each test gets its own [`TestContext`]: a storefront bound to an
//! ephemeral localhost port, serving a scratch static tree and writing its
//! record files into a scratch data directory. Both are removed when the
//! context is dropped.
//!
//! # Test Categories
//!
//! - `storefront_auth` - Registration and login over HTTP
//! - `storefront_checkout` - Checkout flow and the order log
//! - `storefront_static` - Static files and response headers

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::{Path, PathBuf};

use bookstall_storefront::config::StorefrontConfig;
use bookstall_storefront::state::AppState;
use reqwest::Client;
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// A running storefront plus a client pointed at it.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    root: TempDir,
    server: JoinHandle<()>,
}

impl TestContext {
    /// Start a storefront with empty data and static directories.
    pub async fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let static_dir = root.path().join("static");
        let data_dir = root.path().join("data");
        std::fs::create_dir_all(&static_dir).unwrap();
        std::fs::create_dir_all(&data_dir).unwrap();

        let config = StorefrontConfig::from_lookup(|key| match key {
            "BOOKSTALL_PORT" => Some("0".to_string()),
            "BOOKSTALL_STATIC_DIR" => Some(static_dir.display().to_string()),
            "BOOKSTALL_DATA_DIR" => Some(data_dir.display().to_string()),
            _ => None,
        })
        .unwrap();

        let listener = tokio::net::TcpListener::bind(config.socket_addr())
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        let app = bookstall_storefront::app(AppState::new(config));

        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}"),
            root,
            server,
        }
    }

    /// Absolute URL for `path` on the running server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Directory holding `users.txt` and `orders.txt`.
    pub fn data_dir(&self) -> PathBuf {
        self.root.path().join("data")
    }

    /// Directory served as the site root.
    pub fn static_dir(&self) -> PathBuf {
        self.root.path().join("static")
    }

    /// Current contents of a record file, or `None` if it was never written.
    pub fn read_data_file(&self, name: &str) -> Option<String> {
        read_optional(&self.data_dir().join(name))
    }

    /// Seed a record file before exercising the server.
    pub fn write_data_file(&self, name: &str, content: &str) {
        std::fs::write(self.data_dir().join(name), content).unwrap();
    }

    /// Place a file in the static tree.
    pub fn write_static_file(&self, name: &str, content: &str) {
        let path = self.static_dir().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// POST a urlencoded form and return status plus body.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> (u16, String) {
        let response = self
            .client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.text().await.unwrap())
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn read_optional(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => panic!("cannot read {}: {e}", path.display()),
    }
}
