//! uxlearn CLI: the `uxlearn` command.

mod cli;
mod commands;
mod logging;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();

    let config = support::load_config_or_exit(cli.config.as_deref());
    let level = logging::resolve_level(
        cli.log_level.as_deref(),
        std::env::var(logging::LOG_ENV).ok(),
        &config.log.level,
    );
    logging::init_tracing(&level);

    let catalog_path = cli
        .catalog
        .map(PathBuf::from)
        .or_else(|| config.catalog.path.clone());
    let ctx = support::Context {
        config,
        catalog_path,
    };

    match cli.command {
        Commands::Modules { completed, json } => commands::modules::run(&ctx, completed, json),

        Commands::Lesson { id, json } => commands::lesson::run(&ctx, id, json),

        Commands::Check {
            id,
            step,
            placements,
            json,
        } => commands::check::run(
            &ctx,
            commands::check::Args {
                id,
                step,
                placements,
                json,
            },
        ),

        Commands::CatalogCheck { json } => commands::catalog_check::run(&ctx, json),

        Commands::Reaction { small, large, json } => {
            commands::reaction::run(&ctx, small, large, json)
        }

        Commands::Serve { bind } => commands::serve::run(&ctx, bind),
    }
}
