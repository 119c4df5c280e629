//! CLI argument definitions for the member directory.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "memdir",
    version,
    about = "Member directory toolkit - Thai gazetteer and roster utilities",
    long_about = "Query the Thai administrative gazetteer, resolve cascading\n\
                  address selections, and inspect member rosters with\n\
                  Buddhist-Era dates and Thai-rendered addresses."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow record-level member data in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Gazetteer data directory (default: MEMDIR_GAZETTEER_DIR or the
    /// bundled data/gazetteer).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Verify the gazetteer and report integrity findings.
    Doctor(DoctorArgs),

    /// List provinces with their district and subdistrict counts.
    Provinces,

    /// Show the dependent option lists under a province or district.
    Lookup(LookupArgs),

    /// Run an address value through the selector against the gazetteer.
    Resolve(ResolveArgs),

    /// Import a roster file and print a page of members.
    Roster(RosterArgs),
}

#[derive(Parser)]
pub struct DoctorArgs {
    /// Output format for the report.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
pub struct LookupArgs {
    /// Province id whose districts to list.
    #[arg(long = "province", value_name = "ID")]
    pub province: i64,

    /// District id whose subdistricts to list instead.
    #[arg(long = "district", value_name = "ID")]
    pub district: Option<i64>,
}

#[derive(Parser)]
pub struct ResolveArgs {
    /// Address value as JSON, e.g.
    /// '{"provinceId":1,"districtId":1001,"subdistrictId":100101}'.
    #[arg(long = "address", value_name = "JSON")]
    pub address: String,
}

#[derive(Parser)]
pub struct RosterArgs {
    /// Roster file to import (.json or .csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Case-insensitive search term.
    #[arg(long = "search", value_name = "TERM")]
    pub search: Option<String>,

    /// Only show members in this province.
    #[arg(long = "province", value_name = "ID")]
    pub province: Option<i64>,

    /// Sort by first name.
    #[arg(long = "sort", value_enum, default_value = "none")]
    pub sort: SortArg,

    /// Page to display (1-based).
    #[arg(long = "page", value_name = "N", default_value_t = 1)]
    pub page: usize,

    /// Members per page.
    #[arg(long = "per-page", value_name = "N", default_value_t = memdir_roster::DEFAULT_PER_PAGE)]
    pub per_page: usize,

    /// Validate each member and append an issue table.
    #[arg(long = "validate")]
    pub validate: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortArg {
    None,
    Asc,
    Desc,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
