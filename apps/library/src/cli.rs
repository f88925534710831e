use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::LibraryCommand;
use crate::config::{Settings, DEFAULT_CONFIG_FILE};

#[derive(Parser, Debug)]
#[command(name = "library", about = "Keep a catalog of your books and what you have read")]
pub struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    #[arg(long)]
    pub storage_key: Option<String>,
    /// Keep the catalog in memory only for this run.
    #[arg(long)]
    pub ephemeral: bool,
    /// Start empty instead of with the sample books when nothing is saved.
    #[arg(long)]
    pub no_seed: bool,
    #[command(subcommand)]
    pub command: Option<TopCommand>,
}

impl Cli {
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(dir) = &self.data_dir {
            settings.data_dir = dir.clone();
        }
        if let Some(key) = &self.storage_key {
            settings.storage_key = key.clone();
        }
        if self.no_seed {
            settings.seed_samples = false;
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TopCommand {
    #[command(flatten)]
    Catalog(CatalogCommand),
    /// Read commands line by line from stdin.
    Shell,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CatalogCommand {
    /// Print the catalog table.
    List,
    /// Add a book to the top of the catalog.
    Add {
        #[arg(long)]
        author: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        pages: String,
        #[arg(long)]
        read: bool,
    },
    /// Remove the book at a table row.
    Remove { position: usize },
    /// Flip the read status of the book at a table row.
    Toggle { position: usize },
    /// Describe the book at a table row.
    Info { position: usize },
}

impl From<CatalogCommand> for LibraryCommand {
    fn from(command: CatalogCommand) -> Self {
        match command {
            CatalogCommand::List => Self::List,
            CatalogCommand::Add {
                author,
                title,
                pages,
                read,
            } => Self::Add {
                author,
                title,
                pages,
                is_read: read,
            },
            CatalogCommand::Remove { position } => Self::Remove { position },
            CatalogCommand::Toggle { position } => Self::Toggle { position },
            CatalogCommand::Info { position } => Self::Info { position },
        }
    }
}
