use std::path::Path;
use std::sync::Arc;

use clap::value_t_or_exit;
use console::style;
use slog::{info, o, Drain, FnValue, Logger};

use syndeploy::domain::FailureMode;
use syndeploy::infra::utils::SystemToolRunner;
use syndeploy::infra::{DeployLayout, CLOUD_SHELL_ENV_VAR};
use syndeploy_cli::cli_parser;
use syndeploy_cli::commands::*;
use syndeploy_cli::error::CLIError;

const BINARY_NAME: &str = "syndeploy";
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let matches = cli_parser::cli(BINARY_NAME, VERSION).get_matches();
    let verbosity_level = matches.occurrences_of("v") as u8;

    let layout = find_checkout();

    // Cleanup run info dir
    if layout.run_info_dir.exists() {
        std::fs::remove_dir_all(&layout.run_info_dir).unwrap();
        std::fs::create_dir(&layout.run_info_dir).unwrap();
    }

    let logger = configure_logging(verbosity_level, &layout);

    let mut command: Box<dyn Command> = match matches.subcommand() {
        ("run", Some(submatches)) => Box::new(RunCommand::new(
            &layout,
            Arc::new(SystemToolRunner::new()),
            if submatches.is_present("best-effort") {
                FailureMode::BestEffort
            } else {
                FailureMode::Strict
            },
            std::env::var(CLOUD_SHELL_ENV_VAR).ok(),
            verbosity_level == 0 && console::Term::stderr().features().is_attended(),
            logger.new(o!()),
        )),
        ("status", _) => Box::new(StatusCommand::new(&layout)),
        ("completions", Some(submatches)) => Box::new(CompletionsCommand::new(
            cli_parser::cli(BINARY_NAME, VERSION),
            BINARY_NAME,
            value_t_or_exit!(submatches.value_of("shell"), clap::Shell),
        )),
        _ => unimplemented!(),
    };

    let result = if command.needs_checkout() && !in_checkout(&layout) {
        Err(CLIError::NotInCheckout {
            path: layout.root_dir.clone(),
        })
    } else {
        command.run()
    };

    match result {
        Ok(_) => (),
        Err(err) => {
            display_error(err);
            std::process::exit(1);
        }
    }
}

fn find_checkout() -> DeployLayout {
    let cwd = Path::new(".").canonicalize().unwrap();
    if let Some(layout) = find_checkout_rec(&cwd) {
        layout
    } else {
        DeployLayout::new(&cwd)
    }
}

fn find_checkout_rec(p: &Path) -> Option<DeployLayout> {
    if p.join("variables.json").is_file() {
        Some(DeployLayout::new(p))
    } else if let Some(parent) = p.parent() {
        find_checkout_rec(parent)
    } else {
        None
    }
}

fn in_checkout(layout: &DeployLayout) -> bool {
    layout.variables_path.is_file()
}

fn configure_logging(verbosity_level: u8, layout: &DeployLayout) -> Logger {
    let raw_logger = if verbosity_level > 0 {
        // Log into stderr for verbose output
        let decorator = slog_term::PlainSyncDecorator::new(std::io::stderr());
        let drain = slog_term::CompactFormat::new(decorator).build().fuse();
        let drain = slog_async::Async::new(drain).build().fuse();
        Logger::root(drain, o!())
    } else if layout.run_info_dir.exists() {
        // Log to file if the checkout exists
        let log_path = layout.run_info_dir.join("syndeploy.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&log_path)
            .unwrap_or_else(|e| {
                panic!("Failed to create log file at {}: {}", log_path.display(), e)
            });

        let decorator = slog_term::PlainSyncDecorator::new(file);
        let drain = slog_term::CompactFormat::new(decorator).build().fuse();
        let drain = slog_async::Async::new(drain).build().fuse();
        Logger::root(drain, o!())
    } else {
        // Discard otherwise
        let drain = slog::Discard.fuse();
        Logger::root(drain, o!())
    };

    let logger = raw_logger.new(o!("version" => VERSION));

    info!(logger, "Initializing"; "args" => FnValue(|_| {
        let v: Vec<_> = std::env::args().collect();
        format!("{:?}", v)
    }), "checkout" => ?layout);

    logger
}

fn display_error(err: CLIError) {
    eprintln!("{}: {}", style("Error").red().bold(), err);
}
