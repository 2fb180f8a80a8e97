use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::{
    cli::{FilterArgs, OptionsArgs},
    coerce::PRICE_COLUMN,
    criteria::{self, ALL, CONDITION_COLUMN, CRANE_TYPE_COLUMN, Criteria},
    export, io_utils,
    pipeline::{self, Pipeline},
    table,
};

pub fn execute(args: &FilterArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let criteria = resolve_criteria(args)?;
    debug!("Criteria: {criteria:?}");

    let mut pipeline = Pipeline::new().with_encoding(encoding);
    let outcome = pipeline.load(&args.input);
    if outcome.is_empty() {
        warn!(
            "{}",
            outcome
                .message
                .as_deref()
                .unwrap_or("Selected file is empty or could not be loaded")
        );
        return Ok(());
    }
    let raw = outcome.dataset;

    let result = pipeline::run(raw.clone(), &criteria)
        .with_context(|| format!("Filtering {:?}", args.input))?;
    println!(
        "Showing {} crane listings that match your filters.",
        result.filtered.len()
    );
    table::print_dataset(&result.filtered, args.rows);

    if let Some(path) = &args.output {
        let bytes = export::to_csv_bytes(&result.filtered)?;
        write_payload(path, &bytes)?;
        info!("Exported {} row(s) to {:?}", result.filtered.len(), path);
    }
    if let Some(path) = &args.xlsx {
        let bytes = export::to_xlsx_bytes(&result.filtered)?;
        write_payload(path, &bytes)?;
        info!("Exported {} row(s) to {:?}", result.filtered.len(), path);
    }

    if args.raw {
        println!();
        println!("Full raw dataset ({} entries):", raw.len());
        table::print_dataset(&raw, 0);
    }
    Ok(())
}

pub fn show_options(args: &OptionsArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let mut pipeline = Pipeline::new().with_encoding(encoding);
    let outcome = pipeline.load(&args.input);
    if outcome.is_empty() {
        warn!(
            "{}",
            outcome
                .message
                .as_deref()
                .unwrap_or("Selected file is empty or could not be loaded")
        );
        return Ok(());
    }
    let dataset = pipeline::prepare(outcome.dataset);

    println!("Columns: {}", dataset.columns().join(", "));
    if dataset.has_column(CONDITION_COLUMN) {
        let options = criteria::categorical_options(&dataset, CONDITION_COLUMN)?;
        println!("Condition: {}", with_all(options));
    }
    let crane_types = criteria::categorical_options(&dataset, CRANE_TYPE_COLUMN)
        .with_context(|| format!("Listing crane types in {:?}", args.input))?;
    println!("Crane Type: {}", with_all(crane_types));
    match criteria::price_bounds(&dataset) {
        Some((min, max)) => println!("Price Range: {min} - {max}"),
        None if dataset.has_column(PRICE_COLUMN) => println!("Price Range: no numeric prices"),
        None => {}
    }
    Ok(())
}

fn with_all(options: Vec<String>) -> String {
    std::iter::once(ALL.to_string())
        .chain(options)
        .collect::<Vec<_>>()
        .join(", ")
}

fn resolve_criteria(args: &FilterArgs) -> Result<Criteria> {
    let base = match &args.criteria {
        Some(path) => Criteria::load(path)
            .with_context(|| format!("Loading criteria from {path:?}"))?,
        None => Criteria::default(),
    };
    Ok(base.merge(args.flag_criteria()))
}

fn write_payload(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("Writing export to {path:?}"))
}
