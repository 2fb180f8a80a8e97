//! Filter criteria and the predicates derived from them.
//!
//! [`Criteria`] carries one optional value per filter dimension, exactly as a
//! listing sidebar would collect it. [`build_predicates()`] turns the criteria
//! into the set of active [`Predicate`]s for a normalized, coerced dataset:
//!
//! | Dimension    | Column       | Built when                                   |
//! |--------------|--------------|----------------------------------------------|
//! | title        | `title`      | column present and search term non-empty     |
//! | location     | `location`   | column present and search term non-empty     |
//! | condition    | `condition`  | column present and selection not `All`       |
//! | crane type   | `crane type` | always enumerated; missing column is fatal   |
//! | price        | `price`      | column holds at least one number             |
//!
//! The price bounds are observed over the rows left by the other predicates, so
//! a search that narrows to unpriced listings applies no price filter at all.

use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    coerce::PRICE_COLUMN,
    data::{Dataset, Value},
    error::PipelineError,
    filter::{Predicate, apply_filters},
};

/// Selection value meaning "this dimension is inactive".
pub const ALL: &str = "All";

pub const TITLE_COLUMN: &str = "title";
pub const LOCATION_COLUMN: &str = "location";
pub const CONDITION_COLUMN: &str = "condition";
pub const CRANE_TYPE_COLUMN: &str = "crane type";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Criteria {
    pub title: Option<String>,
    pub location: Option<String>,
    pub condition: Option<String>,
    pub crane_type: Option<String>,
    pub price_range: Option<PriceRange>,
}

/// Inclusive price bounds. A missing side falls back to the observed bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl Criteria {
    /// Loads criteria from a YAML or JSON file, chosen by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Reading criteria file {path:?}"))?;
        let criteria = if is_json {
            serde_json::from_str(&raw)?
        } else {
            serde_yaml::from_str(&raw)?
        };
        Ok(criteria)
    }

    /// Overlays every field set in `other` onto `self`.
    pub fn merge(mut self, other: Criteria) -> Self {
        if other.title.is_some() {
            self.title = other.title;
        }
        if other.location.is_some() {
            self.location = other.location;
        }
        if other.condition.is_some() {
            self.condition = other.condition;
        }
        if other.crane_type.is_some() {
            self.crane_type = other.crane_type;
        }
        if let Some(range) = other.price_range {
            let base = self.price_range.unwrap_or_default();
            self.price_range = Some(PriceRange {
                min: range.min.or(base.min),
                max: range.max.or(base.max),
            });
        }
        self
    }
}

/// Distinct, non-null values of `column`, sorted.
///
/// The [`ALL`] sentinel is not part of the result; a selector prepends it.
pub fn categorical_options(
    dataset: &Dataset,
    column: &str,
) -> Result<Vec<String>, PipelineError> {
    let values = dataset
        .column_values(column)
        .ok_or_else(|| PipelineError::missing_column(column))?;
    Ok(values
        .filter(|value| !value.is_null())
        .map(Value::as_display)
        .sorted()
        .dedup()
        .collect())
}

/// Observed minimum and maximum price, truncated toward zero.
pub fn price_bounds(dataset: &Dataset) -> Option<(f64, f64)> {
    let (min, max) = dataset
        .column_values(PRICE_COLUMN)?
        .filter_map(Value::as_number)
        .minmax_by(f64::total_cmp)
        .into_option()?;
    Some((min.trunc(), max.trunc()))
}

pub fn build_predicates(
    dataset: &Dataset,
    criteria: &Criteria,
) -> Result<Vec<Predicate>, PipelineError> {
    let mut predicates = Vec::new();

    for (column, term) in [
        (TITLE_COLUMN, &criteria.title),
        (LOCATION_COLUMN, &criteria.location),
    ] {
        if let Some(term) = active_term(term)
            && dataset.has_column(column)
        {
            predicates.push(Predicate::contains(column, term));
        }
    }

    if dataset.has_column(CONDITION_COLUMN) {
        let options = categorical_options(dataset, CONDITION_COLUMN)?;
        debug!("Condition options: {options:?}");
        if let Some(selected) = active_selection(&criteria.condition) {
            predicates.push(Predicate::equals(CONDITION_COLUMN, selected));
        }
    }

    // No existence guard: a dataset without crane types cannot be filtered.
    let crane_types = categorical_options(dataset, CRANE_TYPE_COLUMN)?;
    debug!("Crane type options: {crane_types:?}");
    if let Some(selected) = active_selection(&criteria.crane_type) {
        predicates.push(Predicate::equals(CRANE_TYPE_COLUMN, selected));
    }

    let narrowed = apply_filters(dataset, &predicates);
    if let Some((observed_min, observed_max)) = price_bounds(&narrowed) {
        let requested = criteria.price_range.unwrap_or_default();
        let min = requested.min.map_or(observed_min, |v| v as f64);
        let max = requested.max.map_or(observed_max, |v| v as f64);
        if min > max {
            return Err(PipelineError::InvalidPriceRange { min, max });
        }
        predicates.push(Predicate::range(PRICE_COLUMN, min, max));
    } else {
        debug!("No numeric prices observed; price filter omitted");
    }

    Ok(predicates)
}

fn active_term(term: &Option<String>) -> Option<&str> {
    term.as_deref().filter(|t| !t.is_empty())
}

fn active_selection(selection: &Option<String>) -> Option<&str> {
    selection.as_deref().filter(|s| !s.is_empty() && *s != ALL)
}
