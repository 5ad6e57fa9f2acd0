//! Reporting on siegfried output
//!
//! The CSV siegfried prints is loaded into a SQLite database; every report
//! (the per-topic CSV files and the HTML summary) is a query over that table.

pub mod csv_reports;
pub mod db;
pub mod html;
pub mod record;

pub use csv_reports::export_reports;
pub use db::{CollectionStats, Database, ReportTable};
pub use html::{ReportContext, write_html};
pub use record::{SiegfriedRecord, parse_siegfried_csv, read_siegfried_csv};
