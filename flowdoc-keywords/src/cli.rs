use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_INPUT: &str = "opm-flow-documentation-2021-04-rev-0.xml";
pub const DEFAULT_OUTPUT: &str = "eclipse_keyword_documentation.json";

#[derive(Parser, Debug)]
#[command(name = "flowdoc-keywords")]
#[command(about = "Extract keyword documentation from the OPM Flow manual XML export")]
pub struct Cli {
    /// OpenDocument XML export of the manual.
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,
    /// JSON file to write; replaced if it exists.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
    /// TOML section table to use instead of the built-in one.
    #[arg(long)]
    pub sections_file: Option<PathBuf>,
    /// Write non-ASCII characters as UTF-8 instead of \uXXXX escapes.
    #[arg(long)]
    pub utf8: bool,
    /// Show per-section record counts.
    #[arg(long)]
    pub summary: bool,
    /// Do not print the run status.
    #[arg(short, long, conflicts_with = "summary")]
    pub quiet: bool,
}
