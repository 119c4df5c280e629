//! Member directory CLI.

use clap::{ColorChoice, Parser};
use memdir_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_doctor, run_lookup, run_provinces, run_resolve, run_roster};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(memdir_gazetteer::gazetteer_root);
    let exit_code = match &cli.command {
        Command::Doctor(args) => match run_doctor(&data_dir, args) {
            Ok(healthy) => {
                if healthy {
                    0
                } else {
                    1
                }
            }
            Err(error) => report_error(&error),
        },
        Command::Provinces => match run_provinces(&data_dir) {
            Ok(()) => 0,
            Err(error) => report_error(&error),
        },
        Command::Lookup(args) => match run_lookup(&data_dir, args) {
            Ok(()) => 0,
            Err(error) => report_error(&error),
        },
        Command::Resolve(args) => match run_resolve(&data_dir, args) {
            Ok(()) => 0,
            Err(error) => report_error(&error),
        },
        Command::Roster(args) => match run_roster(&data_dir, args) {
            Ok(outcome) => {
                if outcome.has_errors {
                    1
                } else {
                    0
                }
            }
            Err(error) => report_error(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
