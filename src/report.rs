use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use std::{
    collections::BTreeMap,
    fmt::Display,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    sales::Sales,
    summary::{DepartmentStats, LOW_AVERAGE_THRESHOLD},
};

/// Column names of the CSV report, in order.
pub const REPORT_HEADER: [&str; 7] = [
    "Department",
    "Employees",
    "Total Sales",
    "Average Sales",
    "Max Sale",
    "Min Sale",
    "Best Seller",
];

const WIDTH: usize = 50;

/// Orders departments by total sales, descending.
///
/// Departments with identical totals are ordered by name, so ranking an
/// already ranked sequence leaves it unchanged.
pub fn rank(
    departments: impl IntoIterator<Item = (String, DepartmentStats)>,
) -> Vec<(String, DepartmentStats)> {
    let mut ranked: Vec<_> = departments.into_iter().collect();
    ranked.sort_by(|(name_a, a), (name_b, b)| {
        b.total_sales
            .cmp(&a.total_sales)
            .then_with(|| name_a.cmp(name_b))
    });
    ranked
}

/// Holds ranked department statistics.
///
/// To create a `Report`, pass the output of [`crate::summarize`] to
/// [`Report::new`].
///
/// To get a printable summary, use its [`Display`] implementation.
///
/// To get the tabular report, use [`Report::rows`], [`Report::write_csv`] or
/// [`Report::write_to_dir`].
#[derive(Debug, Default)]
pub struct Report {
    departments: Vec<(String, DepartmentStats)>,
}

impl Report {
    #[must_use]
    pub fn new(summary: BTreeMap<String, DepartmentStats>) -> Self {
        Self {
            departments: rank(summary),
        }
    }

    /// Returns the departments in ranked order.
    #[must_use]
    pub fn departments(&self) -> &[(String, DepartmentStats)] {
        &self.departments
    }

    #[must_use]
    pub fn total_employees(&self) -> usize {
        self.departments.iter().map(|(_, s)| s.employee_count).sum()
    }

    #[must_use]
    pub fn total_sales(&self) -> Sales {
        self.departments.iter().map(|(_, s)| s.total_sales).sum()
    }

    /// Returns one report row per department, in ranked order.
    #[must_use]
    pub fn rows(&self) -> Vec<ReportRow> {
        self.departments
            .iter()
            .map(|(name, stats)| ReportRow {
                department: name.clone(),
                employees: stats.employee_count,
                total_sales: stats.total_sales,
                average_sales: round_cents(stats.average_sale()),
                max_sale: stats.max_sale,
                min_sale: stats.min_sale,
                best_seller: stats.best_seller.to_string(),
            })
            .collect()
    }

    /// Writes the report as CSV to `wtr`.
    ///
    /// The header row is always written, even if there are no departments.
    ///
    /// # Errors
    ///
    /// Returns any errors from writing to `wtr`.
    pub fn write_csv(&self, wtr: impl Write) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(wtr);
        wtr.write_record(REPORT_HEADER)?;
        for row in self.rows() {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Writes the report to a new file in `dir`, named after `now`.
    ///
    /// `dir` is created if it doesn't exist. Returns the path of the new
    /// file, `report_summary_YYYYMMDD_HHMMSS.csv`.
    ///
    /// # Errors
    ///
    /// Returns errors if the directory or file cannot be created or written.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>, now: DateTime<Local>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let path = dir.join(report_file_name(now));
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        self.write_csv(file)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), departments = self.departments.len(), "report written");
        Ok(path)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:=<WIDTH$}", "")?;
        writeln!(f, "SALES SUMMARY BY DEPARTMENT")?;
        writeln!(f, "{:=<WIDTH$}", "")?;
        for (name, stats) in &self.departments {
            writeln!(f, "Department: {name}")?;
            writeln!(f, " - Employees: {}", stats.employee_count)?;
            writeln!(f, " - Total sales: {}", stats.total_sales)?;
            write!(f, " - Average sale: {:.2}", stats.average_sale())?;
            if stats.is_low_average() {
                write!(f, " LOW AVERAGE (< {LOW_AVERAGE_THRESHOLD})!")?;
            }
            writeln!(f)?;
            writeln!(f, " - Max sale: {}", stats.max_sale)?;
            writeln!(f, " - Min sale: {}", stats.min_sale)?;
            writeln!(f, " - Best seller: {}", stats.best_seller)?;
            writeln!(f, " - Seller ranking:")?;
            for (i, seller) in stats.sellers.iter().enumerate() {
                writeln!(f, "    {}. {seller}", i + 1)?;
            }
            writeln!(f, "{:-<WIDTH$}", "")?;
        }
        writeln!(f, "GLOBAL STATISTICS")?;
        writeln!(f, " - Total employees: {}", self.total_employees())?;
        writeln!(f, " - Total sales: {}", self.total_sales())?;
        writeln!(f, "{:=<WIDTH$}", "")?;
        Ok(())
    }
}

/// Defines the CSV format for report rows.
#[derive(Debug, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Employees")]
    pub employees: usize,
    #[serde(rename = "Total Sales")]
    pub total_sales: Sales,
    #[serde(rename = "Average Sales")]
    pub average_sales: f64,
    #[serde(rename = "Max Sale")]
    pub max_sale: Sales,
    #[serde(rename = "Min Sale")]
    pub min_sale: Sales,
    #[serde(rename = "Best Seller")]
    pub best_seller: String,
}

#[must_use]
pub fn report_file_name(now: DateTime<Local>) -> String {
    format!("report_summary_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round_ties_even() / 100.0
}
