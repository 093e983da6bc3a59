//! Bookstall Core - Shared record types.
//!
//! This crate provides the types shared by the Bookstall components:
//! - `storefront` - Static site plus the login, registration and checkout handlers
//! - `cli` - Command-line tools for inspecting and editing the record files
//!
//! # Architecture
//!
//! The core crate contains only types and the line codec for the flat-file
//! records - no I/O. Reading and appending files lives in the storefront's
//! `db` module.
//!
//! # Modules
//!
//! - [`types`] - Form field newtype and the user/order records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
