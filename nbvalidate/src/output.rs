//! Output formatting for validation reports.
//!
//! Both formats write exactly one line, so the result can be consumed by a
//! parent process reading the first line of output.

use std::io::Write;

use crate::report::ValidationReport;

/// Write the plain status line (`valid` / `invalid: <detail>`).
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_text(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer, "{}", report.status_line())?;
    Ok(())
}

/// Write the report as a single line of compact JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}
