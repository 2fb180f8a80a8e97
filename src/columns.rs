//! Column name canonicalization.
//!
//! Source exports disagree on casing (`Title`, `PRICE`, `Crane Type`), so every
//! column is lower-cased once at load time and all later lookups use the
//! lower-case vocabulary.

use log::debug;

use crate::data::Dataset;

pub fn normalize_column_name(name: &str) -> String {
    name.to_lowercase()
}

/// Lower-cases every column name.
///
/// When two source columns collapse to the same name the later one wins: the
/// merged column stays at the position of its first occurrence and carries the
/// values of the last.
pub fn normalize_columns(dataset: Dataset) -> Dataset {
    let (columns, rows) = dataset.into_parts();

    let mut names: Vec<String> = Vec::with_capacity(columns.len());
    let mut targets = Vec::with_capacity(columns.len());
    for column in &columns {
        let normalized = normalize_column_name(column);
        match names.iter().position(|existing| existing == &normalized) {
            Some(idx) => {
                debug!("Column '{column}' overwrites earlier column '{normalized}'");
                targets.push(idx);
            }
            None => {
                targets.push(names.len());
                names.push(normalized);
            }
        }
    }

    if names.len() == columns.len() {
        return Dataset::new(names, rows);
    }

    let width = names.len();
    let rows = rows
        .into_iter()
        .map(|row| {
            let mut merged = vec![Default::default(); width];
            for (value, &target) in row.into_iter().zip(&targets) {
                merged[target] = value;
            }
            merged
        })
        .collect();
    Dataset::new(names, rows)
}
