use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "minilist")]
#[command(about = "A minimal list with bulk actions that persists between runs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the list (default)
    List,
    Add {
        text: String,
    },
    /// Replace the text of an item
    Edit {
        id: String,
        text: String,
    },
    Check {
        id: String,
    },
    Uncheck {
        id: String,
    },
    Complete {
        id: String,
    },
    Delete {
        id: String,
    },
    SelectAll,
    DeselectAll,
    /// Complete every checked item and clear the selection
    CompleteSelected,
    /// Delete every checked item
    DeleteSelected,
    /// Print every item as a snapshot record
    Dump,
    /// Write a config file with default values if none exists
    InitConfig,
}
