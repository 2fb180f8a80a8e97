//! Cache of parsed sources keyed by path and content fingerprint.
//!
//! A lookup always re-reads the source bytes and hashes them with SHA-256.
//! When the digest matches the cached entry the parsed dataset is reused
//! without touching the CSV parser; otherwise the source is parsed again and
//! the entry replaced.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::debug;
use sha2::{Digest, Sha256};

use crate::{data::Dataset, load};

pub type Fingerprint = [u8; 32];

pub fn fingerprint(bytes: &[u8]) -> Fingerprint {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(bytes));
    out
}

#[derive(Debug)]
struct CacheEntry {
    fingerprint: Fingerprint,
    encoding: &'static Encoding,
    dataset: Dataset,
}

#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CacheEntry>,
    hits: usize,
    misses: usize,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw dataset for `path`, parsing only when the content changed.
    pub fn load(&mut self, path: &Path, encoding: &'static Encoding) -> Result<Dataset> {
        let bytes = load::read_source(path)?;
        let digest = fingerprint(&bytes);

        if let Some(entry) = self.entries.get(path)
            && entry.fingerprint == digest
            && entry.encoding == encoding
        {
            self.hits += 1;
            debug!("Cache hit for {path:?}");
            return Ok(entry.dataset.clone());
        }

        self.misses += 1;
        debug!("Cache miss for {path:?}; parsing");
        let dataset =
            load::parse_csv(&bytes, encoding).with_context(|| format!("Parsing {path:?}"))?;
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                fingerprint: digest,
                encoding,
                dataset: dataset.clone(),
            },
        );
        Ok(dataset)
    }

    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
