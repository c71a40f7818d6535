//! JSON to spreadsheet conversion.
//!
//! Converts an array-of-objects JSON payload into xlsx workbook bytes. The
//! header row is the first element's key set; every cell is rendered as
//! text: strings verbatim, numbers and booleans via their display form,
//! null as an empty cell, nested values as their JSON text.

use anyhow::{Context, Result, bail};
use jsonpad_core::ports::SpreadsheetConverter;
use rust_xlsxwriter::Workbook;
use serde_json::Value;

/// In-memory xlsx converter.
#[derive(Default)]
pub struct XlsxConverter;

impl XlsxConverter {
    pub fn new() -> Self {
        Self
    }
}

impl SpreadsheetConverter for XlsxConverter {
    fn convert(&self, json_text: &str) -> Result<Vec<u8>> {
        let json: Value = serde_json::from_str(json_text).context("Failed to parse JSON")?;
        let Value::Array(rows) = &json else {
            bail!("JSON root must be an array");
        };

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();

        if let Some(Value::Object(first)) = rows.first() {
            for (col, key) in first.keys().enumerate() {
                sheet
                    .write_string(0, col as u16, key.as_str())
                    .context("Failed to write header row")?;
            }

            for (row, item) in rows.iter().enumerate() {
                if let Value::Object(obj) = item {
                    for (col, (_key, value)) in obj.iter().enumerate() {
                        let cell = match value {
                            Value::String(s) => s.clone(),
                            Value::Number(n) => n.to_string(),
                            Value::Bool(b) => b.to_string(),
                            Value::Null => String::new(),
                            _ => value.to_string(),
                        };
                        sheet
                            .write_string((row + 1) as u32, col as u16, cell.as_str())
                            .context("Failed to write data row")?;
                    }
                }
            }
        }

        let bytes = workbook
            .save_to_buffer()
            .context("Failed to encode workbook")?;
        Ok(bytes)
    }
}
