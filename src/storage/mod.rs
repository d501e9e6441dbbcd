//! Report persistence.

mod report_store;

pub use report_store::{ReconRecord, ReportStore};
