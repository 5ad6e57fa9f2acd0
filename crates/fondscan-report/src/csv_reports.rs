//! `csv_reports/` export

use crate::db::{Database, ReportTable};
use fondscan_core::{FondscanError, OutputLayout, ReportKind, Result};
use std::path::Path;

/// Write every report in [`ReportKind::ALL`] to the layout's `csv_reports/`
///
/// Each file starts with its header row, so a report with no data rows is
/// still a non-empty file.
///
/// # Errors
///
/// Returns `Database` if a query fails or `Io` if a file cannot be written
pub fn export_reports(db: &Database, layout: &OutputLayout) -> Result<()> {
    for kind in ReportKind::ALL {
        let table = db.report(kind)?;
        let path = layout.report(kind);
        write_table(&table, &path)?;
        log::debug!("wrote {} ({} rows)", path.display(), table.rows.len());
    }
    Ok(())
}

fn write_table(table: &ReportTable, path: &Path) -> Result<()> {
    let to_io = |e: csv::Error| FondscanError::io(path, e.into());

    let mut writer = csv::Writer::from_path(path).map_err(to_io)?;
    writer.write_record(&table.headers).map_err(to_io)?;
    for row in &table.rows {
        writer.write_record(row).map_err(to_io)?;
    }
    writer.flush().map_err(|e| FondscanError::io(path, e))?;
    Ok(())
}
