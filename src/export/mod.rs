//! Report output.
//!
//! The audit report is a flat CSV file with one row per input URL, in input
//! order.

mod csv;

pub use self::csv::{write_report, ReportRow, REPORT_HEADER};
