//! SQLite store for siegfried results
//!
//! `siegfried.sqlite` is kept in the output folder so the collection can be
//! queried after the run; every CSV and HTML report is produced from it.

use crate::record::SiegfriedRecord;
use fondscan_core::{FondscanError, ReportKind, Result};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, params};
use std::path::Path;

const SCHEMA: &str = include_str!("../resources/schema.sql");

/// Columns of the full-row reports (unidentified, warnings, errors)
const ROW_COLUMNS: &str =
    "filename, filesize, modified, errors, hash, namespace, id, format, version, mime, basis, warning";

const ROW_HEADERS: [&str; 12] = [
    "Filename",
    "Filesize",
    "Date modified",
    "Errors",
    "Checksum",
    "Namespace",
    "ID",
    "Format",
    "Format version",
    "MIME type",
    "Basis for ID",
    "Warning",
];

fn db_err(e: rusqlite::Error) -> FondscanError {
    FondscanError::database(e.to_string())
}

/// A query result ready to be written as CSV or HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// Collection-level figures shown at the top of the HTML report
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectionStats {
    pub total_files: u64,
    pub total_bytes: u64,
    pub earliest_year: Option<String>,
    pub latest_year: Option<String>,
    /// Distinct identified format ids, `UNKNOWN` excluded
    pub distinct_formats: u64,
    pub unidentified: u64,
    pub with_warnings: u64,
    pub with_errors: u64,
    /// Files sharing a checksum with at least one other file
    pub duplicate_files: u64,
    pub empty_files: u64,
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create (or open) the database file and apply the schema
    ///
    /// # Errors
    ///
    /// Returns `Database` if the file cannot be opened or the schema fails
    pub fn create(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(db_err)?;
        conn.execute_batch(SCHEMA).map_err(db_err)?;
        log::info!("Database ready at {}", path.display());
        Ok(Self { conn })
    }

    /// # Errors
    ///
    /// Returns `Database` if SQLite cannot allocate the database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        conn.execute_batch(SCHEMA).map_err(db_err)?;
        Ok(Self { conn })
    }

    /// Insert all records in a single transaction
    ///
    /// # Errors
    ///
    /// Returns `Database` on any SQLite failure; nothing is inserted then
    pub fn import(&mut self, records: &[SiegfriedRecord]) -> Result<usize> {
        let tx = self.conn.transaction().map_err(db_err)?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO siegfried (filename, filesize, modified, errors, hash, namespace, \
                     id, format, version, mime, basis, warning) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                )
                .map_err(db_err)?;
            for r in records {
                let filesize = i64::try_from(r.filesize).map_err(|_| {
                    FondscanError::database(format!("file size of {} out of range", r.filename))
                })?;
                stmt.execute(params![
                    r.filename,
                    filesize,
                    r.modified,
                    r.errors,
                    r.hash,
                    r.namespace,
                    r.id,
                    r.format,
                    r.version,
                    r.mime,
                    r.basis,
                    r.warning,
                ])
                .map_err(db_err)?;
            }
        }
        tx.commit().map_err(db_err)?;
        log::debug!("imported {} siegfried records", records.len());
        Ok(records.len())
    }

    fn count(&self, sql: &str) -> Result<u64> {
        let n: i64 = self.conn.query_row(sql, [], |row| row.get(0)).map_err(db_err)?;
        Ok(u64::try_from(n).unwrap_or(0))
    }

    /// # Errors
    ///
    /// Returns `Database` on any SQLite failure
    pub fn stats(&self) -> Result<CollectionStats> {
        let (earliest_year, latest_year): (Option<String>, Option<String>) = self
            .conn
            .query_row(
                "SELECT MIN(SUBSTR(modified, 1, 4)), MAX(SUBSTR(modified, 1, 4)) \
                 FROM siegfried WHERE modified <> ''",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(db_err)?;

        Ok(CollectionStats {
            total_files: self.count("SELECT COUNT(*) FROM siegfried")?,
            total_bytes: self.count("SELECT COALESCE(SUM(filesize), 0) FROM siegfried")?,
            earliest_year,
            latest_year,
            distinct_formats: self
                .count("SELECT COUNT(DISTINCT id) FROM siegfried WHERE id <> 'UNKNOWN' AND id <> ''")?,
            unidentified: self.count("SELECT COUNT(*) FROM siegfried WHERE id = 'UNKNOWN'")?,
            with_warnings: self.count("SELECT COUNT(*) FROM siegfried WHERE warning <> ''")?,
            with_errors: self.count("SELECT COUNT(*) FROM siegfried WHERE errors <> ''")?,
            duplicate_files: self.count(
                "SELECT COUNT(*) FROM siegfried WHERE hash <> '' AND hash IN \
                 (SELECT hash FROM siegfried GROUP BY hash HAVING COUNT(*) > 1)",
            )?,
            empty_files: self.count("SELECT COUNT(*) FROM siegfried WHERE filesize = 0")?,
        })
    }

    /// Run the query behind one CSV report
    ///
    /// # Errors
    ///
    /// Returns `Database` on any SQLite failure
    pub fn report(&self, kind: ReportKind) -> Result<ReportTable> {
        let (headers, sql): (Vec<&'static str>, String) = match kind {
            ReportKind::Formats => (
                vec!["Format", "ID", "Count"],
                "SELECT format, id, COUNT(*) AS num FROM siegfried \
                 GROUP BY id, format ORDER BY num DESC, format"
                    .to_string(),
            ),
            ReportKind::FormatVersions => (
                vec!["Format", "ID", "Version", "Count"],
                "SELECT format, id, version, COUNT(*) AS num FROM siegfried \
                 GROUP BY id, format, version ORDER BY num DESC, format, version"
                    .to_string(),
            ),
            ReportKind::MimeTypes => (
                vec!["MIME type", "Count"],
                "SELECT mime, COUNT(*) AS num FROM siegfried \
                 GROUP BY mime ORDER BY num DESC, mime"
                    .to_string(),
            ),
            ReportKind::Years => (
                vec!["Year Last Modified", "Count"],
                "SELECT SUBSTR(modified, 1, 4) AS year, COUNT(*) AS num FROM siegfried \
                 WHERE modified <> '' GROUP BY year ORDER BY year DESC"
                    .to_string(),
            ),
            ReportKind::Unidentified => (
                ROW_HEADERS.to_vec(),
                format!("SELECT {ROW_COLUMNS} FROM siegfried WHERE id = 'UNKNOWN' ORDER BY filename"),
            ),
            ReportKind::Warnings => (
                ROW_HEADERS.to_vec(),
                format!("SELECT {ROW_COLUMNS} FROM siegfried WHERE warning <> '' ORDER BY filename"),
            ),
            ReportKind::Errors => (
                ROW_HEADERS.to_vec(),
                format!("SELECT {ROW_COLUMNS} FROM siegfried WHERE errors <> '' ORDER BY filename"),
            ),
            ReportKind::Duplicates => (
                vec!["Checksum", "Filename", "Filesize"],
                "SELECT hash, filename, filesize FROM siegfried WHERE hash <> '' AND hash IN \
                 (SELECT hash FROM siegfried GROUP BY hash HAVING COUNT(*) > 1) \
                 ORDER BY hash, filename"
                    .to_string(),
            ),
        };

        let mut stmt = self.conn.prepare(&sql).map_err(db_err)?;
        let width = stmt.column_count();
        let rows = stmt
            .query_map([], |row| {
                (0..width)
                    .map(|i| row.get_ref(i).map(value_to_string))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })
            .map_err(db_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(db_err)?;

        Ok(ReportTable { headers, rows })
    }
}

fn value_to_string(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
    }
}
