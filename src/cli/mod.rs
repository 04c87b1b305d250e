//! CLI module - Command-line interface for Gitchen
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::SearchCriteria;

/// Gitchen - find something to cook
#[derive(Parser)]
#[command(name = "gitchen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    #[command(alias = "daemon")]
    Serve,

    /// Search recipes by name, first letter, category, area or ingredient
    #[command(alias = "s")]
    Search {
        /// What the query matches against
        #[arg(value_enum)]
        kind: SearchKind,
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Recipes containing every listed ingredient
    #[command(alias = "ing")]
    Ingredients {
        /// Comma separated, e.g. "egg,milk"
        list: String,
    },

    /// Show a recipe with its reviews
    #[command(alias = "i")]
    Show { id: String },

    /// Random recipes
    #[command(alias = "r")]
    Random {
        /// Number of draws (defaults to provider.random_sample_size)
        count: Option<usize>,
    },

    /// Read a recipe's instructions paragraph by paragraph
    Read {
        id: String,
        /// Mark paragraph N as read
        #[arg(long, conflicts_with_all = ["unmark", "reset"])]
        mark: Option<usize>,
        /// Mark paragraph N as unread
        #[arg(long, conflicts_with = "reset")]
        unmark: Option<usize>,
        /// Forget all progress for this recipe
        #[arg(long)]
        reset: bool,
    },

    /// Manage the configured user's favorites
    #[command(alias = "fav")]
    Favorites {
        #[command(subcommand)]
        command: FavoriteCommands,
    },

    /// Create default config file
    Init,
}

#[derive(Subcommand)]
pub enum FavoriteCommands {
    #[command(alias = "ls")]
    List,
    Add { meal_id: String },
    #[command(alias = "rm")]
    Remove { meal_id: String },
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchKind {
    Name,
    Letter,
    Category,
    Area,
    Ingredient,
}

impl SearchKind {
    /// Builds criteria from the joined query words.
    pub fn criteria(self, query: &str) -> anyhow::Result<SearchCriteria> {
        let query = query.trim();
        if query.is_empty() {
            anyhow::bail!("Search query cannot be empty");
        }

        Ok(match self {
            Self::Name => SearchCriteria::ByName(query.to_string()),
            Self::Letter => {
                let mut chars = query.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_alphabetic() => SearchCriteria::ByFirstLetter(c),
                    _ => anyhow::bail!("Letter search expects a single letter"),
                }
            }
            Self::Category => SearchCriteria::ByCategory(query.to_string()),
            Self::Area => SearchCriteria::ByArea(query.to_string()),
            Self::Ingredient => SearchCriteria::ByIngredient(query.to_string()),
        })
    }
}

pub use commands::*;
