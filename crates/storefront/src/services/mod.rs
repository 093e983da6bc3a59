//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Username/password registration and login against `users.txt`

pub mod auth;
