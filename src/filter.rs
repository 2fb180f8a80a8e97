use log::debug;

use crate::data::{Dataset, Value};

/// A boolean test over one row, derived from a single filter criterion.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Case-insensitive substring match. `needle` is stored lower-cased.
    Contains { column: String, needle: String },
    /// Exact match against the value's display text.
    Equals { column: String, value: String },
    /// Inclusive numeric range. Non-numeric cells never match.
    Range { column: String, min: f64, max: f64 },
}

impl Predicate {
    pub fn contains(column: &str, needle: &str) -> Self {
        Predicate::Contains {
            column: column.to_string(),
            needle: needle.to_lowercase(),
        }
    }

    pub fn equals(column: &str, value: &str) -> Self {
        Predicate::Equals {
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    pub fn range(column: &str, min: f64, max: f64) -> Self {
        Predicate::Range {
            column: column.to_string(),
            min,
            max,
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Predicate::Contains { column, .. }
            | Predicate::Equals { column, .. }
            | Predicate::Range { column, .. } => column,
        }
    }

    pub fn matches(&self, dataset: &Dataset, row: &[Value]) -> bool {
        let Some(cell) = dataset.value(row, self.column()) else {
            return false;
        };
        match (self, cell) {
            (_, Value::Null) => false,
            (Predicate::Contains { needle, .. }, value) => {
                value.as_display().to_lowercase().contains(needle.as_str())
            }
            (Predicate::Equals { value: expected, .. }, value) => {
                value.as_display() == *expected
            }
            (Predicate::Range { min, max, .. }, Value::Number(n)) => *n >= *min && *n <= *max,
            (Predicate::Range { .. }, Value::Text(_)) => false,
        }
    }
}

/// Keeps the rows that satisfy every predicate, in their original order.
pub fn apply_filters(dataset: &Dataset, predicates: &[Predicate]) -> Dataset {
    let rows = dataset
        .rows()
        .iter()
        .filter(|row| predicates.iter().all(|p| p.matches(dataset, row)))
        .cloned()
        .collect::<Vec<_>>();
    debug!(
        "{} of {} row(s) passed {} predicate(s)",
        rows.len(),
        dataset.len(),
        predicates.len()
    );
    dataset.with_rows(rows)
}
