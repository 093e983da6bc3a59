//! User record stored in `users.txt`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Separator between username and password on a `users.txt` line.
pub const USER_SEPARATOR: char = ':';

/// A registered user, stored one per line as `username:password`.
///
/// The password is kept in plain text; `Debug` redacts it so records can be
/// logged safely.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
}

impl UserRecord {
    /// Create a new user record.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Render the record as a newline-terminated line.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{}{USER_SEPARATOR}{}\n", self.username, self.password)
    }

    /// Parse one line of `users.txt`.
    ///
    /// The line is trimmed, then split on the first `:`. Returns `None` for
    /// blank lines and lines without a separator; such lines are skipped by
    /// the loader rather than treated as errors. Either side may be empty.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let (username, password) = line.trim().split_once(USER_SEPARATOR)?;
        Some(Self::new(username, password))
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
