//! Loading listing exports into a [`Dataset`].
//!
//! [`load_dataset()`] propagates every failure. [`load_or_empty()`] is for
//! callers that treat an unreadable source as "no data": it returns the empty
//! dataset sentinel together with a message describing what went wrong.

use std::path::Path;

use anyhow::{Context, Result, bail};
use encoding_rs::{Encoding, UTF_8};

use crate::{
    data::{Dataset, Value},
    io_utils,
};

/// Result of a load that never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    pub message: Option<String>,
}

impl LoadOutcome {
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }
}

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

pub fn load_dataset(path: &Path) -> Result<Dataset> {
    load_dataset_with_encoding(path, UTF_8)
}

pub fn load_dataset_with_encoding(path: &Path, encoding: &'static Encoding) -> Result<Dataset> {
    let bytes = read_source(path)?;
    parse_csv(&bytes, encoding).with_context(|| format!("Parsing {path:?}"))
}

/// Reads the raw bytes of a supported source.
pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    if !is_supported(path) {
        bail!("Unsupported file format: {path:?}");
    }
    std::fs::read(path).with_context(|| format!("Opening input file {path:?}"))
}

pub fn load_or_empty(path: &Path, encoding: &'static Encoding) -> LoadOutcome {
    into_outcome(path, load_dataset_with_encoding(path, encoding))
}

/// Folds a load result into an outcome, replacing failures with the empty dataset.
pub fn into_outcome(path: &Path, result: Result<Dataset>) -> LoadOutcome {
    match result {
        Ok(dataset) if dataset.is_empty() => LoadOutcome {
            dataset,
            message: Some(format!(
                "Selected file {path:?} is empty or could not be loaded"
            )),
        },
        Ok(dataset) => LoadOutcome {
            dataset,
            message: None,
        },
        Err(err) => LoadOutcome {
            dataset: Dataset::empty(),
            message: Some(format!("Error loading file: {err:#}")),
        },
    }
}

/// Parses CSV bytes with a mandatory header row. Empty fields become `Null`,
/// short rows are padded with `Null` and rows with surplus fields are rejected.
pub fn parse_csv(bytes: &[u8], encoding: &'static Encoding) -> Result<Dataset> {
    let mut reader = io_utils::open_csv_reader(bytes);
    let headers = reader.byte_headers()?.clone();
    let columns = io_utils::decode_record(&headers, encoding)?;
    if columns.is_empty() {
        bail!("Missing header row");
    }

    let mut rows = Vec::new();
    for (idx, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Reading row {}", idx + 2))?;
        let decoded = io_utils::decode_record(&record, encoding)
            .with_context(|| format!("Decoding row {}", idx + 2))?;
        if decoded.len() > columns.len() {
            bail!(
                "Row {} has {} field(s) but the header declares {}",
                idx + 2,
                decoded.len(),
                columns.len()
            );
        }
        rows.push(decoded.iter().map(|field| Value::from_field(field)).collect());
    }
    Ok(Dataset::new(columns, rows))
}
