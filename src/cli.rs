//! Command-line interface definition for Stockroom
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for authentication, items, usage records, and
//! categories.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stockroom - inventory and office-administration client
///
/// Talk to a Stockroom backend from the terminal: sign in, browse the
/// inventory, borrow and return items, and review usage records.
#[derive(Parser, Debug, Clone)]
#[command(name = "stockroom")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/stockroom.yaml")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parses the process arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for Stockroom
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Log in and store the session credentials
    Login {
        /// Backend account name
        #[arg(short, long)]
        username: String,

        /// Password; falls back to the STOCKROOM_PASSWORD environment
        /// variable
        #[arg(short, long, env = "STOCKROOM_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Clear the stored session credentials
    Logout,

    /// Inventory items
    Items {
        #[command(subcommand)]
        command: ItemCommand,
    },

    /// Borrow/return usage records
    Usages {
        #[command(subcommand)]
        command: UsageCommand,
    },

    /// Item categories
    Categories {
        #[command(subcommand)]
        command: CategoryCommand,
    },
}

/// Item subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ItemCommand {
    /// List items
    List {
        /// Only items available for borrowing
        #[arg(long, conflicts_with = "in_use")]
        available: bool,

        /// Only items currently borrowed
        #[arg(long = "in-use")]
        in_use: bool,

        /// Emit raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one item with its usage history
    Show {
        /// Item ID
        id: i64,

        /// Emit raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Borrow an item
    Borrow {
        /// Item ID
        id: i64,

        /// Borrower name
        #[arg(short, long)]
        user: String,

        /// Borrower contact
        #[arg(long)]
        contact: Option<String>,

        /// What the item will be used for
        #[arg(long)]
        purpose: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,

        /// Condition of the item at pickup
        #[arg(long)]
        condition: Option<String>,
    },

    /// Return a borrowed item
    Return {
        /// Item ID
        id: i64,

        /// Condition of the item at return
        #[arg(long)]
        condition: Option<String>,

        /// Notes recorded with the return
        #[arg(long)]
        notes: Option<String>,
    },

    /// Upload an image for an item
    UploadImage {
        /// Item ID
        id: i64,

        /// Path to the image file
        path: PathBuf,
    },
}

/// Usage record subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum UsageCommand {
    /// List usage records
    List {
        /// Only records for items still out
        #[arg(long)]
        current: bool,

        /// Filter by borrower name (substring match)
        #[arg(long)]
        user: Option<String>,

        /// Emit raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Category subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum CategoryCommand {
    /// List categories
    List {
        /// Emit raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
