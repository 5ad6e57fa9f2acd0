//! Rows of siegfried's CSV output

use fondscan_core::{FondscanError, HashAlgorithm, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Checksum columns siegfried may emit, tried when the configured one is absent
const HASH_COLUMNS: [&str; 4] = ["md5", "sha1", "sha256", "sha512"];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SiegfriedRecord {
    pub filename: String,
    pub filesize: u64,
    pub modified: String,
    pub errors: String,
    pub hash: String,
    pub namespace: String,
    pub id: String,
    pub format: String,
    pub version: String,
    pub mime: String,
    pub basis: String,
    pub warning: String,
}

/// Column positions resolved from the header row.
///
/// When several identifiers are configured siegfried repeats the
/// `namespace..warning` block; only the first one is used.
struct Columns {
    filename: usize,
    filesize: Option<usize>,
    modified: Option<usize>,
    errors: Option<usize>,
    hash: Option<usize>,
    namespace: Option<usize>,
    id: usize,
    format: Option<usize>,
    version: Option<usize>,
    mime: Option<usize>,
    basis: Option<usize>,
    warning: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord, hash: HashAlgorithm) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                FondscanError::parse(format!("siegfried CSV has no '{name}' column"))
            })
        };

        let hash_column =
            find(hash.as_str()).or_else(|| HASH_COLUMNS.iter().find_map(|name| find(*name)));

        Ok(Self {
            filename: require("filename")?,
            filesize: find("filesize"),
            modified: find("modified"),
            errors: find("errors"),
            hash: hash_column,
            namespace: find("namespace"),
            id: require("id")?,
            format: find("format"),
            version: find("version"),
            mime: find("mime"),
            basis: find("basis"),
            warning: find("warning"),
        })
    }
}

fn field(row: &csv::StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|i| row.get(i))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Parse siegfried CSV from any reader
///
/// # Errors
///
/// Returns `Parse` if the header lacks `filename` or `id`, a row is
/// malformed, or a file size is not a number
pub fn parse_siegfried_csv<R: Read>(reader: R, hash: HashAlgorithm) -> Result<Vec<SiegfriedRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| FondscanError::parse(format!("siegfried CSV header: {e}")))?
        .clone();
    let columns = Columns::resolve(&headers, hash)?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let line = index + 2;
        let row = row.map_err(|e| FondscanError::parse(format!("siegfried CSV line {line}: {e}")))?;

        let filesize = match columns.filesize.and_then(|i| row.get(i)) {
            Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map_err(|_| {
                FondscanError::parse(format!("siegfried CSV line {line}: bad filesize '{raw}'"))
            })?,
            _ => 0,
        };

        records.push(SiegfriedRecord {
            filename: field(&row, Some(columns.filename)),
            filesize,
            modified: field(&row, columns.modified),
            errors: field(&row, columns.errors),
            hash: field(&row, columns.hash),
            namespace: field(&row, columns.namespace),
            id: field(&row, Some(columns.id)),
            format: field(&row, columns.format),
            version: field(&row, columns.version),
            mime: field(&row, columns.mime),
            basis: field(&row, columns.basis),
            warning: field(&row, columns.warning),
        });
    }

    Ok(records)
}

/// Parse the siegfried CSV written at `path`
///
/// # Errors
///
/// Returns `Io` if the file cannot be opened, otherwise as
/// [`parse_siegfried_csv`]
pub fn read_siegfried_csv(path: &Path, hash: HashAlgorithm) -> Result<Vec<SiegfriedRecord>> {
    let file = File::open(path).map_err(|e| FondscanError::io(path, e))?;
    parse_siegfried_csv(file, hash)
}
