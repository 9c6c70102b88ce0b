#![doc = include_str!("../README.md")]
pub mod cli;
mod groups;
mod prompt;
mod report;
mod sales;
mod store;
mod summary;

pub use groups::Groups;
pub use prompt::prompt_for_record;
pub use report::{rank, report_file_name, Report, ReportRow, REPORT_HEADER};
pub use sales::Sales;
pub use store::{append_record, create_sample_csv, read_records, SAMPLE_RECORDS};
pub use summary::{summarize, DepartmentStats, Record, SellerEntry, LOW_AVERAGE_THRESHOLD};
