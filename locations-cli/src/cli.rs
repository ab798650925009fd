use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use locations_core::{
    FileConfigStore, LocationRepository, LocationResolver, ProviderSettings,
    config::load_sensitive_locations,
};

use crate::{console::InquireConsole, flows::LocationCli};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "locations", version, about = "Manage saved weather locations")]
pub struct Cli {
    /// Config file to use instead of the one in the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Dotenv file holding sensitive locations; defaults to `.env` next to the config file.
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Log debug details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Runs the interactive menu when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Interactive menu with every location action.
    Manage,

    /// Look up an address and optionally save it.
    Search {
        /// Address to look up; prompted for when absent.
        query: Option<String>,
    },

    /// Show saved locations.
    List,

    /// Save a location from typed coordinates.
    Add,

    /// Look up the current location from the IP address and optionally save it.
    Current,

    /// Remove a saved location.
    Delete,

    /// Pick a location and print its coordinates.
    Choose {
        /// Also offer sensitive locations from the environment.
        #[arg(long)]
        all: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let store = match self.config {
            Some(path) => FileConfigStore::new(path),
            None => FileConfigStore::at_default_path()?,
        };
        let env_file = self.env_file.unwrap_or_else(|| store.path().with_file_name(".env"));
        tracing::debug!(
            "Using config {} and env file {}",
            store.path().display(),
            env_file.display()
        );

        let sensitive = load_sensitive_locations(&env_file)?;
        let repo = LocationRepository::new(store, sensitive);
        let resolver = LocationResolver::from_settings(&ProviderSettings::default())
            .context("Failed to set up location providers")?;

        let mut console = InquireConsole;
        let mut app = LocationCli::new(&repo, &resolver, &mut console);

        match self.command.unwrap_or(Command::Manage) {
            Command::Manage => app.manage().await?,
            Command::Search { query } => app.search_location(query).await?,
            Command::List => app.view_locations()?,
            Command::Add => app.add_location()?,
            Command::Current => app.save_current_location().await?,
            Command::Delete => app.delete_location()?,
            Command::Choose { all } => app.print_chosen_location(all)?,
        }

        Ok(())
    }
}
