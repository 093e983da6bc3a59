//! Bookstall CLI - Record file management tools.
//!
//! # Usage
//!
//! ```bash
//! # List registered users
//! bookstall users list
//!
//! # Register a user
//! bookstall users add -u alice -p secret
//!
//! # Record an order
//! bookstall orders add --book "Dune" --name Ann --phone 555
//!
//! # Point at another data directory
//! bookstall --data-dir /var/lib/bookstall users list
//! ```
//!
//! # Commands
//!
//! - `users list` - Print every stored username
//! - `users add` - Register a user (refuses taken usernames)
//! - `orders add` - Append an order to the order log

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bookstall")]
#[command(author, version, about = "Bookstall CLI tools")]
struct Cli {
    /// Directory holding users.txt and orders.txt
    #[arg(long, global = true, env = "BOOKSTALL_DATA_DIR", default_value = "crates/storefront/data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage registered users
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage the order log
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List registered usernames
    List,
    /// Register a new user
    Add {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password (stored in plain text)
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// Append an order
    Add {
        /// Book title
        #[arg(short, long)]
        book: String,

        /// Buyer name
        #[arg(short, long)]
        name: String,

        /// Buyer phone number
        #[arg(long)]
        phone: String,
    },
}

#[tokio::main]
async fn main() {
    // Pick up BOOKSTALL_DATA_DIR from .env before parsing
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Users { action } => match action {
            UserAction::List => {
                commands::users::list(&cli.data_dir, &mut std::io::stdout().lock()).await?;
            }
            UserAction::Add { username, password } => {
                commands::users::add(&cli.data_dir, &username, &password).await?;
            }
        },
        Commands::Orders { action } => match action {
            OrderAction::Add { book, name, phone } => {
                commands::orders::add(&cli.data_dir, &book, &name, &phone).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_users_add() {
        let cli = Cli::try_parse_from([
            "bookstall",
            "--data-dir",
            "/tmp/books",
            "users",
            "add",
            "-u",
            "alice",
            "-p",
            "secret",
        ])
        .expect("valid arguments");

        assert_eq!(cli.data_dir, PathBuf::from("/tmp/books"));
        assert!(matches!(
            cli.command,
            Commands::Users {
                action: UserAction::Add { ref username, .. }
            } if username == "alice"
        ));
    }
}
