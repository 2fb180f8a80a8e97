#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crane_listings::data::{Dataset, Value};
use tempfile::{TempDir, tempdir};

/// Mixed-case export as produced by the listing scrapers.
pub const LISTINGS_CSV: &str = "\
Title,Location,Condition,Crane Type,Price
Grove RT890E Rough Terrain,\"Houston, TX\",Used,Rough Terrain,\"$450,000\"
Liebherr LTM 1100,\"Denver, CO\",New,All Terrain,\"$1,250,000\"
Manitowoc 999 Crawler,\"Tulsa, OK\",Used,Crawler,Call for price
Terex RT 780,\"Austin, TX\",,Rough Terrain,\"$310,500 USD\"
";

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    pub fn write_listings(&self) -> PathBuf {
        self.write("cranes.csv", LISTINGS_CSV)
    }
}

pub fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

/// The two-record dataset used throughout the filtering properties.
pub fn two_cranes() -> Dataset {
    Dataset::new(
        vec![
            "title".into(),
            "condition".into(),
            "crane type".into(),
            "price".into(),
        ],
        vec![
            vec![text("Crane A"), text("Used"), text("Crawler"), text("$10,000")],
            vec![text("Crane B"), text("New"), text("Tower"), text("$25,000")],
        ],
    )
}
