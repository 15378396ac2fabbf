mod commands;
mod display;

use anyhow::Result;
use beatchart_cli::cli::{Args, Command};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG overrides the default filter
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("beatchart_cli=info,beatchart=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Generate {
            features,
            difficulty,
            seed,
            session,
            config,
        } => commands::generate::run(
            &args.store,
            &features,
            &difficulty,
            seed,
            session,
            config.as_deref(),
        ),
        Command::Show { session, json } => commands::show::run(&args.store, &session, json),
        Command::Play {
            session,
            hits,
            results,
        } => commands::play::run(&args.store, &session, &hits, results.as_deref()),
        Command::Delete { session } => commands::delete::run(&args.store, &session),
    }
}
