//! CLI operation handlers.
//!
//! [`organization_report`] runs the ranking for each organization argument
//! and [`output`] formats the report.

pub mod organization_report;
pub mod output;
