use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use std::io;

use sales_report::{
    append_record,
    cli::{Args, Entry},
    create_sample_csv, prompt_for_record, read_records, summarize, Groups, Record, Report,
};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);
    debug!(?args, "starting");

    if create_sample_csv(&args.input)? {
        println!("Sample CSV created at {}\n", args.input.display());
    }

    match args.entry() {
        Entry::Append(record) => add_record(&args, &record)?,
        Entry::InvalidSales(sales) => {
            warn!(%sales, "discarding command-line entry");
            println!("Sales must be a non-negative whole number, got {sales:?}. Ignoring entry.\n");
        }
        Entry::Usage => {
            println!("Usage: sales-report [NAME DEPARTMENT SALES]\n");
        }
        Entry::Prompt if args.no_prompt => {}
        Entry::Prompt => {
            if let Some(record) = prompt_for_record(io::stdin().lock(), io::stdout())? {
                add_record(&args, &record)?;
            }
        }
    }

    let groups = match &args.groups {
        Some(path) => Groups::from_file(path)?,
        None => Groups::default(),
    };
    let records = read_records(&args.input)?;
    let report = Report::new(summarize(records.into_iter().map(|r| groups.apply(r))));
    print!("\n{report}\n");
    let path = report.write_to_dir(&args.report_dir, Local::now())?;
    println!("Report written to {}\n", path.display());
    Ok(())
}

fn add_record(args: &Args, record: &Record) -> Result<()> {
    append_record(&args.input, record)?;
    println!(
        "New record added: {} | {} | {}\n",
        record.name, record.department, record.sales
    );
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().to_string().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
