//! Core types for Bookstall.
//!
//! Each record type knows how to render itself as one line of its backing
//! file and, where the file is read back, how to parse such a line.

pub mod field;
pub mod order;
pub mod user;

pub use field::{FieldError, Required};
pub use order::{ORDER_SEPARATOR, OrderRecord};
pub use user::{USER_SEPARATOR, UserRecord};
