use clap::{Parser, Subcommand};

/// CLI arguments parser using `clap`
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Subcommand chosen to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Adds a new GitHub account interactively
    New,
    /// Switches the global git identity to an account
    Switch {
        /// Name of the account to switch to
        #[arg(short, long)]
        account: Option<String>,
    },
    /// Points a repository remote at an account's SSH alias
    Setup {
        /// Name of the account to bind the repository to
        #[arg(short, long)]
        account: Option<String>,
        /// Remote whose URL is rewritten
        #[arg(short, long, default_value = "origin")]
        remote: String,
    },
    /// Deletes an account
    Delete {
        /// Name of the account to delete
        name: String,
    },
    /// Displays the current global git identity
    Current,
    /// Displays all stored accounts
    List,
}
