use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sparkfire")]
#[command(version, about = "A learning board: Spark → In Progress → Discarded → Fire")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a YAML config file (defaults to ./sparkfire.yaml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Board data file, overriding the config
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new spark
    Add {
        /// Item title (at most 80 characters are kept)
        title: String,

        /// Item type (tutorial, course, book, article, project, idea, other)
        #[arg(long = "type", short = 't', default_value = "other")]
        item_type: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the board
    List {
        /// Only show one column (envisioned, in_progress, discarded, completed)
        #[arg(value_name = "STATUS")]
        status: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open an item, counting as an access while it is in progress
    Get {
        /// Item ID or unique prefix
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move a spark or discarded item to In Progress
    Start {
        /// Item ID or unique prefix
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Discard an in-progress item
    Discard {
        /// Item ID or unique prefix
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark an in-progress item as completed
    Complete {
        /// Item ID or unique prefix
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update an item's title, type, takeaways or learning notes
    Update {
        /// Item ID or unique prefix
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New type
        #[arg(long = "type", short = 't')]
        item_type: Option<String>,

        /// Takeaways text
        #[arg(long, conflicts_with = "clear_takeaways")]
        takeaways: Option<String>,

        /// Learning notes text
        #[arg(long, conflicts_with = "clear_notes")]
        notes: Option<String>,

        /// Remove the takeaways
        #[arg(long)]
        clear_takeaways: bool,

        /// Remove the learning notes
        #[arg(long)]
        clear_notes: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an item
    Delete {
        /// Item ID or unique prefix
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },
}
