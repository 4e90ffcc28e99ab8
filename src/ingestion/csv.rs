//! Delimited-text reader.

use std::io::Read;

use crate::error::{DashboardError, DashboardResult};
use crate::types::{DataSet, DataType, Schema, Value};

/// Read delimited text from an already-open source into a [`DataSet`] shaped like `schema`.
///
/// Rules:
///
/// - The input must have a header row.
/// - Headers must contain all schema fields (order can differ; extra columns are ignored).
/// - Blank cells become [`Value::Null`]; other cells are coerced to the field type.
///
/// Opening the source is left to the caller, so every error from here on is about the content
/// or a failed read.
pub fn read_delimited<R: Read>(input: R, schema: &Schema, delimiter: u8) -> DashboardResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(input);
    read_csv_from_reader(&mut rdr, schema)
}

/// Read delimited data from an existing CSV reader.
pub fn read_csv_from_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
) -> DashboardResult<DataSet> {
    let headers = rdr.headers()?.clone();

    // Map schema fields -> CSV column indexes (allows re-ordered CSV columns).
    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    let mut missing = Vec::new();
    for field in &schema.fields {
        match headers.iter().position(|h| h.trim() == field.name) {
            Some(idx) => col_idxs.push(idx),
            None => missing.push(field.name.as_str()),
        }
    }
    if !missing.is_empty() {
        return Err(DashboardError::malformed(format!(
            "missing required columns {missing:?}. headers={:?}",
            headers.iter().collect::<Vec<_>>()
        )));
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &csv_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = record.get(csv_idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: DataType,
    raw: &str,
) -> DashboardResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    // Text keeps spellings like "NA" (a region code, not a null).
    let textual = matches!(data_type, DataType::Utf8 | DataType::Date);
    if !textual && is_null_marker(trimmed) {
        return Ok(Value::Null);
    }

    let invalid = |message: String| DashboardError::InvalidValue {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        DataType::Utf8 | DataType::Date => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| invalid(e.to_string())),
        DataType::Float64 => parse_float(trimmed)
            .map(Value::Float64)
            .map_err(invalid),
        DataType::Bool => parse_bool(trimmed).map(Value::Bool).map_err(invalid),
    }
}

/// The usual spreadsheet null spellings.
fn is_null_marker(s: &str) -> bool {
    matches!(
        s,
        "NA" | "N/A" | "n/a" | "#N/A" | "<NA>" | "NaN" | "nan" | "-nan" | "NULL" | "null" | "None"
    )
}

/// Infinities are rejected so they cannot leak into sums.
fn parse_float(s: &str) -> Result<f64, String> {
    let v = s.parse::<f64>().map_err(|e| e.to_string())?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err("expected a finite number".to_string())
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}
