mod commands;
mod logging;
mod progress;
mod tree_view;

use std::process;
use std::time::Instant;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands, RenameArgs};
use dotenv::dotenv;
use progress::CliReporter;
use slugfiles_core::{AppConfig, ProgressReporter, RenameEngine, RunOptions, RunReport};
use tracing::{error, info};

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match slugfiles_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Rename(rename_args)) => match run_rename(&config, rename_args) {
            Ok(report) if report.is_clean() => {}
            Ok(report) => {
                error!("{} operations failed", report.failures.len());
                process::exit(2);
            }
            Err(err) => {
                error!("Error: {:#}", err);
                process::exit(1);
            }
        },
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }
}

fn run_rename(config: &AppConfig, args: RenameArgs) -> anyhow::Result<RunReport> {
    let options = RunOptions::from_config(&args.path, config)
        .with_output(args.output)
        .recursive(args.recursive)
        .case_sensitive(args.case_sensitive)
        .dry_run(args.dry_run);
    let engine = RenameEngine::new(options);
    let reporter = CliReporter::new(engine.options().dry_run);

    reporter.on_scan_start();
    let scan_start = Instant::now();
    let files = engine
        .scan()
        .with_context(|| format!("cannot read {}", args.path.display()))?;
    reporter.on_scan_complete(files.len(), scan_start.elapsed().as_secs_f64());

    println!("{}", "______________________".dimmed());
    println!("{}", tree_view::render_tree(&files, &args.path));
    println!("{}", "______________________".dimmed());

    let report = engine.run_files(files, &reporter);

    for action in &report.actions {
        if report.dry_run {
            println!("{} {}", "would".yellow(), action);
        } else {
            println!("{}", action);
        }
    }
    for failure in &report.failures {
        println!("{} {}: {}", "failed".red(), failure.action, failure.message);
    }

    info!(
        "{} files scanned, {} operations planned, {} directories renamed",
        format!("{}", report.files_scanned).green(),
        format!("{}", report.operations_planned).green(),
        format!("{}", report.directories_renamed).cyan(),
    );
    if report.collisions > 0 {
        info!(
            "{} target names were claimed by more than one file",
            format!("{}", report.collisions).red()
        );
    }

    Ok(report)
}
