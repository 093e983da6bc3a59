//! Order commands.
//!
//! # Usage
//!
//! ```bash
//! # Record an order taken over the phone
//! bookstall orders add --book "Dune" --name Ann --phone 555
//! ```

use std::path::Path;

use bookstall_core::OrderRecord;
use bookstall_storefront::db::OrderRepository;

use super::{CommandError, ensure_data_dir, required};

/// Append one order to the order log.
///
/// # Errors
///
/// Returns `CommandError::EmptyArgument` for a blank field.
/// Returns `CommandError::Repository` if the log cannot be written.
pub async fn add(data_dir: &Path, book: &str, name: &str, phone: &str) -> Result<(), CommandError> {
    let order = OrderRecord::new(
        required("book", book)?.into_inner(),
        required("name", name)?.into_inner(),
        required("phone", phone)?.into_inner(),
    );

    ensure_data_dir(data_dir).await?;
    let repo = OrderRepository::in_dir(data_dir);
    repo.append(&order).await?;

    tracing::info!("Order recorded: {} ({})", order.book, repo.path().display());
    Ok(())
}
