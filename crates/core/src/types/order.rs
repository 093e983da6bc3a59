//! Order record appended to `orders.txt`.

use serde::{Deserialize, Serialize};

/// Separator between fields on an `orders.txt` line.
pub const ORDER_SEPARATOR: char = '|';

/// A placed order, stored one per line as `book|name|phone`.
///
/// Orders form a write-only log: there is no uniqueness and no check that
/// `book` names a title in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub book: String,
    pub buyer_name: String,
    pub phone: String,
}

impl OrderRecord {
    /// Create a new order record.
    #[must_use]
    pub fn new(
        book: impl Into<String>,
        buyer_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            book: book.into(),
            buyer_name: buyer_name.into(),
            phone: phone.into(),
        }
    }

    /// Render the record as a newline-terminated line.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{}{ORDER_SEPARATOR}{}{ORDER_SEPARATOR}{}\n",
            self.book, self.buyer_name, self.phone
        )
    }
}
