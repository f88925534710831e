use std::{io, process::ExitCode};

use anyhow::Result;
use catalog_core::CatalogStore;
use clap::Parser;
use storage::{DisabledSnapshotStore, FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use library::{
    bootstrap,
    cli::{CatalogCommand, Cli, TopCommand},
    commands::LibraryCommand,
    config::{load_settings, Settings},
    controller::Controller,
    report, shell,
};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config)?;
    cli.apply_to(&mut settings);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(io::stderr)
        .init();

    let persistence = open_persistence(&settings, cli.ephemeral)?;
    let seed = if settings.seed_samples {
        bootstrap::sample_books()?
    } else {
        Vec::new()
    };
    let store = CatalogStore::create_with_seed(persistence, || seed);
    let mut controller = Controller::attach(store)?;

    let command = cli
        .command
        .unwrap_or(TopCommand::Catalog(CatalogCommand::List));
    let code = match command {
        TopCommand::Catalog(command) => {
            let command = LibraryCommand::from(command);
            let mut stdout = io::stdout().lock();
            let outcome = report::write_report(&mut stdout, &mut controller, &command)?;
            if outcome.is_rejection() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        TopCommand::Shell => {
            shell::run(&mut controller, io::stdin().lock(), io::stdout().lock())?;
            ExitCode::SUCCESS
        }
    };

    let mut store = controller.detach();
    info!(books = store.len(), "catalog session finished");
    store.dispose();
    Ok(code)
}

fn open_persistence(settings: &Settings, ephemeral: bool) -> Result<Box<dyn SnapshotStore>> {
    if ephemeral {
        info!("catalog kept in memory for this run");
        return Ok(Box::new(MemorySnapshotStore::new()));
    }
    if !settings.persist {
        info!("catalog persistence disabled");
        return Ok(Box::new(DisabledSnapshotStore));
    }
    let store = FileSnapshotStore::new(settings.data_dir.clone(), settings.storage_key.clone())?;
    info!(path = %store.path().display(), "using catalog snapshot file");
    Ok(Box::new(store))
}
