//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::db::{OrderRepository, UserRepository};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It owns the one
/// [`UserRepository`] and [`OrderRepository`] of the process, so every
/// request appends through the same per-file write lock.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    users: UserRepository,
    orders: OrderRepository,
}

impl AppState {
    /// Create a new application state with repositories in `config.data_dir`.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let users = UserRepository::in_dir(&config.data_dir);
        let orders = OrderRepository::in_dir(&config.data_dir);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                users,
                orders,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the user repository.
    #[must_use]
    pub fn users(&self) -> &UserRepository {
        &self.inner.users
    }

    /// Get a reference to the order repository.
    #[must_use]
    pub fn orders(&self) -> &OrderRepository {
        &self.inner.orders
    }
}
