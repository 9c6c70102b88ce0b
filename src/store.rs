use anyhow::{Context, Result};
use tracing::{debug, info};

use std::{
    fs::{self, OpenOptions},
    path::Path,
};

use crate::{sales::Sales, summary::Record};

/// Records written to a freshly created input file.
pub const SAMPLE_RECORDS: [(&str, &str, u64); 5] = [
    ("Alice", "Marketing", 1200),
    ("Bob", "Sales", 1500),
    ("Charlie", "Sales", 800),
    ("Diana", "HR", 600),
    ("Eve", "Marketing", 700),
];

/// Creates an input file at `path` holding [`SAMPLE_RECORDS`], unless a file
/// already exists there.
///
/// Returns `true` if the file was created.
///
/// # Errors
///
/// Returns errors if the parent directory or the file cannot be created or
/// written.
pub fn create_sample_csv(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let mut wtr = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for (name, department, sales) in SAMPLE_RECORDS {
        wtr.serialize(Record::new(name, department, Sales::new(sales)))?;
    }
    wtr.flush()?;
    info!(path = %path.display(), "created sample input file");
    Ok(true)
}

/// Appends `record` to the input file at `path`.
///
/// If the file is missing or empty, the header row is written first.
///
/// # Errors
///
/// Returns errors if the file cannot be opened or written.
pub fn append_record(path: impl AsRef<Path>, record: &Record) -> Result<()> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let is_empty = file.metadata()?.len() == 0;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(is_empty)
        .from_writer(file);
    wtr.serialize(record)
        .with_context(|| format!("writing {}", path.display()))?;
    wtr.flush()?;
    debug!(path = %path.display(), ?record, "appended record");
    Ok(())
}

/// Reads all sales records from the CSV file at `path`.
///
/// # Errors
///
/// Returns any errors from opening or parsing the file, including rows whose
/// sales value is not a non-negative whole number.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: Record = result.with_context(|| format!("{}", path.display()))?;
        records.push(record);
    }
    debug!(path = %path.display(), records = records.len(), "read input file");
    Ok(records)
}
