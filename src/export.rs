//! Serialization of datasets into downloadable payloads.
//!
//! Both exporters build the whole payload in memory. Nothing is cached; call
//! again to re-export.

use log::debug;
use rust_xlsxwriter::{Workbook, XlsxError};

use crate::{
    data::{Dataset, Value},
    error::PipelineError,
    io_utils,
};

pub const SHEET_NAME: &str = "Listings";
pub const CSV_FILE_NAME: &str = "filtered_cranes.csv";
pub const XLSX_FILE_NAME: &str = "filtered_cranes.xlsx";

pub fn to_csv_bytes(dataset: &Dataset) -> Result<Vec<u8>, PipelineError> {
    let mut writer = io_utils::open_csv_writer(Vec::new());
    writer.write_record(dataset.columns())?;
    for row in dataset.rows() {
        writer.write_record(row.iter().map(Value::as_display))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| PipelineError::Io(err.into_error()))?;
    debug!("Serialized {} row(s) to {} CSV byte(s)", dataset.len(), bytes.len());
    Ok(bytes)
}

pub fn to_xlsx_bytes(dataset: &Dataset) -> Result<Vec<u8>, PipelineError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in dataset.columns().iter().enumerate() {
        worksheet.write_string(0, cell_col(col)?, name.as_str())?;
    }
    for (row_idx, row) in dataset.rows().iter().enumerate() {
        let row_num = cell_row(row_idx + 1)?;
        for (col, value) in row.iter().enumerate() {
            match value {
                Value::Text(text) => {
                    worksheet.write_string(row_num, cell_col(col)?, text.as_str())?;
                }
                Value::Number(number) => {
                    worksheet.write_number(row_num, cell_col(col)?, *number)?;
                }
                Value::Null => {}
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    debug!(
        "Serialized {} row(s) to {} XLSX byte(s)",
        dataset.len(),
        bytes.len()
    );
    Ok(bytes)
}

fn cell_row(idx: usize) -> Result<u32, PipelineError> {
    u32::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError.into())
}

fn cell_col(idx: usize) -> Result<u16, PipelineError> {
    u16::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError.into())
}
