//! Bulk import of shops from CSV and JSON files.
//!
//! A glob pattern selects the input files. Each match is classified by
//! extension into an [`ImportFileKind`] and loaded with row-level
//! `INSERT OR REPLACE`. Unsupported files are skipped with an
//! [`ImportWarning`] and do not stop the batch.
//!
//! The whole import, including an optional rebuild, runs in one transaction:
//! a decoding or storage failure in any file leaves the table untouched.
//!
//! # File formats
//!
//! CSV columns are `slug`, `hostname` and an optional `name`. A first row
//! naming `slug` and `hostname` (in any case) is a header and maps columns
//! by name; otherwise every row is data in that positional order:
//!
//! ```text
//! Slug,Hostname,Name
//! acme,acme.io,Acme Store
//! globex,globex.com
//! ```
//!
//! JSON files hold an array of shop objects:
//!
//! ```json
//! [{"slug": "acme", "hostname": "acme.io", "name": "Acme Store"}]
//! ```
//!
//! # Rebuild
//!
//! With `rebuild` set the table is dropped and recreated with no primary key
//! and no uniqueness constraint before loading, so duplicate rows are kept.
//! Reopening the datastore does not restore the constraints.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use rusqlite::{Connection, Statement, params};
use sps_core::Shop;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::schema::REBUILD_SQL;

const UPSERT_SQL: &str = "INSERT OR REPLACE INTO shop (slug, hostname, name) VALUES (?1, ?2, ?3)";

/// Import handling chosen for a matched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFileKind {
    /// `.csv`, with or without a header row.
    Csv,
    /// `.json` array of shop objects.
    Json,
    /// Anything else; skipped.
    Unsupported,
}

impl ImportFileKind {
    /// Classifies a path by its extension.
    pub fn classify(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("csv") => Self::Csv,
            Some("json") => Self::Json,
            _ => Self::Unsupported,
        }
    }
}

/// Non-fatal problems encountered during an import.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportWarning {
    /// The file's extension is neither `.csv` nor `.json`.
    #[error("Skipping unsupported file: {}", .0.display())]
    UnsupportedFile(PathBuf),
}

/// Summary of an import run.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Number of files the pattern matched, skipped ones included. This is
    /// the import summary count.
    pub files_matched: usize,
    /// Number of rows written across all loaded files.
    pub rows_loaded: usize,
    /// Files that were skipped.
    pub warnings: Vec<ImportWarning>,
}

/// Expands `pattern` and loads every matching file into the `shop` table.
pub(crate) fn import_shops(
    conn: &mut Connection,
    pattern: &str,
    rebuild: bool,
) -> Result<ImportReport> {
    let paths = expand_pattern(pattern)?;

    let tx = conn.transaction()?;
    if rebuild {
        debug!("Rebuilding shop table without constraints");
        tx.execute_batch(REBUILD_SQL)?;
    }

    let mut report = ImportReport {
        files_matched: paths.len(),
        ..ImportReport::default()
    };

    {
        let mut upsert = tx.prepare(UPSERT_SQL)?;
        for path in &paths {
            let kind = ImportFileKind::classify(path);
            debug!(path = %path.display(), ?kind, "Importing file");
            let rows = match kind {
                ImportFileKind::Csv => load_csv(&mut upsert, path)?,
                ImportFileKind::Json => load_json(&mut upsert, path)?,
                ImportFileKind::Unsupported => {
                    let warning = ImportWarning::UnsupportedFile(path.clone());
                    warn!("{}", warning);
                    report.warnings.push(warning);
                    continue;
                }
            };
            report.rows_loaded += rows;
        }
    }

    tx.commit()?;
    info!(
        files = report.files_matched,
        rows = report.rows_loaded,
        skipped = report.warnings.len(),
        rebuild,
        "Import complete"
    );
    Ok(report)
}

fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    glob::glob(pattern)?
        .map(|entry| {
            entry.map_err(|e| {
                let path = e.path().to_path_buf();
                StoreError::io(path, e.into_error())
            })
        })
        .collect()
}

/// Column positions of the shop fields within a CSV record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CsvColumns {
    slug: usize,
    hostname: usize,
    name: Option<usize>,
}

impl CsvColumns {
    /// Headerless files are read as `slug, hostname[, name]`.
    const POSITIONAL: Self = Self {
        slug: 0,
        hostname: 1,
        name: Some(2),
    };

    /// Reads `record` as a header row if it names both `slug` and `hostname`,
    /// ignoring case.
    fn from_header(record: &StringRecord) -> Option<Self> {
        let find = |column: &str| {
            record
                .iter()
                .position(|field| field.eq_ignore_ascii_case(column))
        };
        Some(Self {
            slug: find("slug")?,
            hostname: find("hostname")?,
            name: find("name"),
        })
    }

    fn shop(&self, record: &StringRecord) -> Option<Shop> {
        let slug = record.get(self.slug)?;
        let hostname = record.get(self.hostname)?;
        let name = self.name.and_then(|i| record.get(i)).unwrap_or_default();
        Some(Shop::new(slug, hostname, name))
    }
}

fn load_csv(upsert: &mut Statement<'_>, path: &Path) -> Result<usize> {
    let csv_error = |source| StoreError::CsvError {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?;

    let mut columns = CsvColumns::POSITIONAL;
    let mut rows = 0;
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        if index == 0 {
            if let Some(header) = CsvColumns::from_header(&record) {
                columns = header;
                continue;
            }
        }

        let shop = columns
            .shop(&record)
            .ok_or_else(|| StoreError::CsvRowTooShort {
                path: path.to_path_buf(),
                line: record.position().map_or(0, |pos| pos.line()),
                columns: record.len(),
            })?;
        upsert_shop(upsert, &shop)?;
        rows += 1;
    }
    Ok(rows)
}

fn load_json(upsert: &mut Statement<'_>, path: &Path) -> Result<usize> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let shops: Vec<Shop> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| StoreError::JsonError {
            path: path.to_path_buf(),
            source,
        })?;

    for shop in &shops {
        upsert_shop(upsert, shop)?;
    }
    Ok(shops.len())
}

fn upsert_shop(upsert: &mut Statement<'_>, shop: &Shop) -> Result<()> {
    upsert.execute(params![shop.slug, shop.hostname, shop.name])?;
    Ok(())
}
