use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::criteria::{Criteria, PriceRange};

#[derive(Debug, Parser)]
#[command(author, version, about = "Browse, filter and export crane listing CSVs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the CSV exports available in a folder
    List(ListArgs),
    /// Show the filter options offered by a dataset
    Options(OptionsArgs),
    /// Filter a dataset, preview the result, and export it
    Filter(FilterArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Folder holding the listing exports
    #[arg(short, long, default_value = "output")]
    pub folder: PathBuf,
}

#[derive(Debug, Args)]
pub struct OptionsArgs {
    /// Listing export to inspect
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Listing export to filter
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// YAML or JSON file with filter criteria; flags override its values
    #[arg(long)]
    pub criteria: Option<PathBuf>,
    /// Case-insensitive search in the title column
    #[arg(long)]
    pub title: Option<String>,
    /// Case-insensitive search in the location column
    #[arg(long)]
    pub location: Option<String>,
    /// Exact condition to keep ("All" disables the filter)
    #[arg(long)]
    pub condition: Option<String>,
    /// Exact crane type to keep ("All" disables the filter)
    #[arg(long = "crane-type")]
    pub crane_type: Option<String>,
    /// Lowest price to keep (defaults to the observed minimum)
    #[arg(long = "min-price")]
    pub min_price: Option<i64>,
    /// Highest price to keep (defaults to the observed maximum)
    #[arg(long = "max-price")]
    pub max_price: Option<i64>,
    /// Write the filtered listings as CSV
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Write the filtered listings as an Excel workbook
    #[arg(long)]
    pub xlsx: Option<PathBuf>,
    /// Number of filtered rows to preview (0 shows all)
    #[arg(long, default_value_t = 20)]
    pub rows: usize,
    /// Also print the full raw dataset
    #[arg(long)]
    pub raw: bool,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

impl FilterArgs {
    /// Criteria expressed by the command-line flags alone.
    pub fn flag_criteria(&self) -> Criteria {
        let price_range = (self.min_price.is_some() || self.max_price.is_some()).then_some(
            PriceRange {
                min: self.min_price,
                max: self.max_price,
            },
        );
        Criteria {
            title: self.title.clone(),
            location: self.location.clone(),
            condition: self.condition.clone(),
            crane_type: self.crane_type.clone(),
            price_range,
        }
    }
}
