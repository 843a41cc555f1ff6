//! Run summary types.

mod scan_summary;

pub use scan_summary::ScanSummary;
