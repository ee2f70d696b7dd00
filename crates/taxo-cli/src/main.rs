//! taxo CLI - Main entry point

use clap::Parser;
use std::process;
use taxo_cli::commands::{self, lineage, lookup, traverse};
use taxo_cli::{Cli, Commands, Config};
use taxo_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use tracing::error;

#[tokio::main]
async fn main() {
    // Settings may live in a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    if cli.command.is_none() {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    }

    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("taxo")
        .build();

    // Environment variables take precedence; a malformed one falls back to the flags
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // Queries still work without logging
    let _guard = match init_logging(&log_config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e}");
            None
        }
    };

    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> taxo_cli::Result<()> {
    let Some(ref command) = cli.command else {
        unreachable!("Command should have been validated in main");
    };

    let config = Config::from_cli(cli)?;

    if let Commands::Build {
        source,
        output,
        canonical_ranks,
        limit,
    } = command
    {
        return commands::build::run(
            &config,
            source.clone(),
            output.clone(),
            canonical_ranks.clone(),
            *limit,
        )
        .await;
    }

    let taxonomy = commands::load_taxonomy(&config).await?;

    match command {
        Commands::Build { .. } => unreachable!("Build is handled before loading tables"),
        Commands::Name { taxids } => lookup::name(&config, &taxonomy, taxids),
        Commands::Rank { taxids } => lookup::rank(&config, &taxonomy, taxids),
        Commands::Names { taxid } => lookup::names(&config, &taxonomy, *taxid),
        Commands::Path {
            taxid,
            exclude_root,
        } => traverse::path(&config, &taxonomy, *taxid, *exclude_root),
        Commands::Children {
            taxid,
            direct,
            count,
        } => traverse::children(&config, &taxonomy, *taxid, *direct, *count),
        Commands::Lca { taxids } => traverse::lca(&config, &taxonomy, taxids),
        Commands::Lineage {
            taxid,
            canonical,
            format,
        } => lineage::lineage(&config, &taxonomy, *taxid, *canonical, *format),
        Commands::Species { taxids, or_self } => {
            lineage::species(&config, &taxonomy, taxids, *or_self)
        }
        Commands::Subset { input, output } => {
            commands::subset::run(&config, &taxonomy, input, output)
        }
        Commands::Info => commands::info::run(&config, &taxonomy),
    }
}
