//! Serialization of computed samples to CSV and JSON text

pub mod csv;
pub mod format;
pub mod json;

pub use csv::{csv_row, to_csv, CSV_HEADER};
pub use format::{format_scientific, format_value};
pub use json::{to_json, to_json_at, ExportRecord, MODEL_IDENTIFIER};
