//! Plain-text rendering of a dataset for terminal display.

use std::fmt::Write as _;

use crate::data::Dataset;

const COLUMN_GAP: &str = "  ";
const MAX_CELL_WIDTH: usize = 40;

/// Renders at most `limit` rows as an aligned table. `limit` of zero renders all.
pub fn render_dataset(dataset: &Dataset, limit: usize) -> String {
    let shown = if limit == 0 {
        dataset.len()
    } else {
        limit.min(dataset.len())
    };
    let cells = dataset.rows()[..shown]
        .iter()
        .map(|row| row.iter().map(|v| clip(&v.as_display())).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut widths = dataset
        .columns()
        .iter()
        .map(|name| name.chars().count().max(3))
        .collect::<Vec<_>>();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_line(dataset.columns(), &widths));
    let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_line(&rule, &widths));
    for row in &cells {
        let _ = writeln!(output, "{}", format_line(row, &widths));
    }
    if shown < dataset.len() {
        let _ = writeln!(output, "... {} more row(s)", dataset.len() - shown);
    }
    output
}

pub fn print_dataset(dataset: &Dataset, limit: usize) {
    print!("{}", render_dataset(dataset, limit));
}

fn format_line(values: &[String], widths: &[usize]) -> String {
    let mut line = values
        .iter()
        .zip(widths)
        .map(|(value, &width)| format!("{value:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.truncate(line.trim_end().len());
    line
}

fn clip(value: &str) -> String {
    let flattened = value.replace(['\n', '\r', '\t'], " ");
    if flattened.chars().count() <= MAX_CELL_WIDTH {
        return flattened;
    }
    let mut clipped = flattened
        .chars()
        .take(MAX_CELL_WIDTH - 3)
        .collect::<String>();
    clipped.push_str("...");
    clipped
}
