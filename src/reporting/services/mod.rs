//! Reporting services.

mod dashboards;

pub use dashboards::{HR_VIEWERS, REPORT_VIEWERS, ReportingError, ReportingResult, ReportingService};
