//! One filter/export cycle: load, normalize, coerce, build predicates, filter.
//!
//! A [`Pipeline`] owns its [`DatasetCache`]; nothing is shared between
//! pipelines, so each request works on its own copy of the data.

use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use log::{debug, info, warn};

use crate::{
    cache::DatasetCache,
    coerce::{self, PRICE_COLUMN},
    columns,
    criteria::{self, Criteria},
    data::Dataset,
    error::PipelineError,
    filter,
    load::{self, LoadOutcome},
};

/// Filtered result alongside the prepared source it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub prepared: Dataset,
    pub filtered: Dataset,
}

#[derive(Debug)]
pub struct Pipeline {
    cache: DatasetCache,
    encoding: &'static Encoding,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::with_cache(DatasetCache::new())
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(cache: DatasetCache) -> Self {
        Self {
            cache,
            encoding: UTF_8,
        }
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    /// Loads a raw source through the cache. Failures yield the empty dataset.
    pub fn load(&mut self, path: &Path) -> LoadOutcome {
        let result = self.cache.load(path, self.encoding);
        let outcome = load::into_outcome(path, result);
        if !outcome.is_empty() {
            info!(
                "Loaded {:?} - {} entries",
                path.file_name().unwrap_or(path.as_os_str()),
                outcome.dataset.len()
            );
        }
        outcome
    }

    /// Loads, prepares and filters `path` in one go.
    ///
    /// Returns `Ok(None)` when the source could not be loaded or holds no rows,
    /// after logging the load message.
    pub fn run_path(
        &mut self,
        path: &Path,
        criteria: &Criteria,
    ) -> Result<Option<FilterOutcome>, PipelineError> {
        let outcome = self.load(path);
        if outcome.is_empty() {
            if let Some(message) = &outcome.message {
                warn!("{message}");
            }
            return Ok(None);
        }
        run(outcome.dataset, criteria).map(Some)
    }
}

/// Canonicalizes column names and coerces the price column.
pub fn prepare(raw: Dataset) -> Dataset {
    let normalized = columns::normalize_columns(raw);
    coerce::coerce_column(normalized, PRICE_COLUMN)
}

pub fn run(raw: Dataset, criteria: &Criteria) -> Result<FilterOutcome, PipelineError> {
    let prepared = prepare(raw);
    let predicates = criteria::build_predicates(&prepared, criteria)?;
    debug!("Active predicates: {predicates:?}");
    let filtered = filter::apply_filters(&prepared, &predicates);
    debug!(
        "{} of {} listing(s) match the filters",
        filtered.len(),
        prepared.len()
    );
    Ok(FilterOutcome { prepared, filtered })
}
