use std::path::Path;

use anyhow::{Context, Result};

use crate::load;

/// File names of the CSV exports in `folder`, sorted.
pub fn list_datasets(folder: &Path) -> Result<Vec<String>> {
    let entries =
        std::fs::read_dir(folder).with_context(|| format!("Listing datasets in {folder:?}"))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Reading entry in {folder:?}"))?;
        let path = entry.path();
        if path.is_file()
            && load::is_supported(&path)
            && let Some(name) = path.file_name().and_then(|n| n.to_str())
        {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}
