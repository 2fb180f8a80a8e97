//! Best-effort numeric coercion of price-like text.
//!
//! Coercion is split into two stages so each can be exercised on its own:
//! [`strip_non_numeric()`] removes everything but digits and decimal points,
//! then [`parse_numeric()`] turns what is left into a finite number. Values that
//! do not survive either stage become [`Value::Null`]; coercion never fails.

use crate::data::{Dataset, Value};

pub const PRICE_COLUMN: &str = "price";

pub fn strip_non_numeric(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

pub fn parse_numeric(stripped: &str) -> Option<f64> {
    if stripped.is_empty() {
        return None;
    }
    stripped
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

pub fn coerce_value(value: &Value) -> Value {
    if value.is_null() {
        return Value::Null;
    }
    let stripped = strip_non_numeric(&value.as_display());
    match parse_numeric(&stripped) {
        Some(number) => Value::Number(number),
        None => Value::Null,
    }
}

/// Coerces every value of `column` in place. Absent columns are left alone.
pub fn coerce_column(dataset: Dataset, column: &str) -> Dataset {
    let Some(idx) = dataset.column_index(column) else {
        return dataset;
    };
    let (columns, mut rows) = dataset.into_parts();
    for row in &mut rows {
        if let Some(cell) = row.get_mut(idx) {
            *cell = coerce_value(cell);
        }
    }
    Dataset::new(columns, rows)
}
