//! Command-line argument parsing.

use clap::Parser;
use tracing::Level;

use std::{path::PathBuf, str::FromStr};

use crate::{sales::Sales, summary::Record};

/// Summarizes employee sales by department.
///
/// Reads the input CSV (creating it with sample data if it doesn't exist),
/// prints a per-department summary, and writes a timestamped CSV report.
///
/// With no ENTRY arguments, offers to add a record interactively. With
/// exactly three (NAME DEPARTMENT SALES), appends that record first.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Args {
    /// Record to append: NAME DEPARTMENT SALES
    #[arg(value_name = "ENTRY", allow_negative_numbers = true)]
    pub entry: Vec<String>,

    /// Input CSV file with the header `name,department,sales`
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "data/input_data.csv",
        env = "SALES_REPORT_INPUT"
    )]
    pub input: PathBuf,

    /// Directory for timestamped report files
    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        default_value = "data/reports",
        env = "SALES_REPORT_DIR"
    )]
    pub report_dir: PathBuf,

    /// Department group configuration (lines of `GROUP_NAME | GROUP_REGEX`)
    #[arg(short, long, value_name = "FILE")]
    pub groups: Option<PathBuf>,

    /// Don't offer to add a record interactively
    #[arg(long)]
    pub no_prompt: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// What the positional arguments ask for.
#[derive(Debug, PartialEq, Eq)]
pub enum Entry {
    /// No arguments: offer the interactive prompt.
    Prompt,
    /// A valid `NAME DEPARTMENT SALES` triple.
    Append(Record),
    /// Three arguments, but SALES isn't a non-negative whole number.
    InvalidSales(String),
    /// Any other number of arguments.
    Usage,
}

impl Args {
    #[must_use]
    pub fn entry(&self) -> Entry {
        match self.entry.as_slice() {
            [] => Entry::Prompt,
            [name, department, sales] => match Sales::from_str(sales) {
                Ok(sales) => Entry::Append(Record::new(name, department, sales)),
                Err(_) => Entry::InvalidSales(sales.clone()),
            },
            _ => Entry::Usage,
        }
    }

    #[must_use]
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        }
    }
}
