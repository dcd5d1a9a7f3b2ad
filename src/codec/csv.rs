//! CSV via the csv crate
//!
//! The first record is the header. Each following record becomes an object
//! keyed by header name; every field stays a String.

use crate::error::{Error, Result, SyntaxError};
use crate::format::Format;
use crate::value::{Map, Value};

pub(super) fn parse(text: &str) -> std::result::Result<Value, SyntaxError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let header: Vec<String> = match records.next() {
        Some(record) => record
            .map_err(syntax_error)?
            .iter()
            .map(str::to_string)
            .collect(),
        None => return Ok(Value::Array(Vec::new())),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(syntax_error)?;
        let mut row = Map::with_capacity(header.len());
        // Short rows pad with "", extra fields are dropped
        for (idx, name) in header.iter().enumerate() {
            let field = record.get(idx).unwrap_or_default();
            row.insert(name.clone(), Value::String(field.to_string()));
        }
        rows.push(Value::Object(row));
    }
    Ok(Value::Array(rows))
}

fn syntax_error(e: ::csv::Error) -> SyntaxError {
    let line = e.position().map(|pos| pos.line() as usize);
    let err = SyntaxError::new(Format::Csv, e.to_string());
    match line {
        Some(line) => SyntaxError {
            line: Some(line),
            ..err
        },
        None => err,
    }
}

pub(super) fn stringify(value: &Value) -> Result<String> {
    let Some(rows) = value.as_array() else {
        return Err(Error::shape(
            Format::Csv,
            format!("expected an array of objects, found {}", value.type_name()),
        ));
    };

    let mut objects = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        match row {
            Value::Object(map) => objects.push(map),
            other => {
                return Err(Error::shape(
                    Format::Csv,
                    format!("row {} is {}, expected an object", idx, other.type_name()),
                ))
            }
        }
    }

    // Union of keys, first appearance wins the column position
    let mut header: Vec<&str> = Vec::new();
    for map in &objects {
        for key in map.keys() {
            if !header.contains(&key.as_str()) {
                header.push(key);
            }
        }
    }
    if header.is_empty() {
        return Ok(String::new());
    }

    let mut writer = ::csv::WriterBuilder::new()
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(&header).map_err(write_error)?;

    for (idx, map) in objects.iter().enumerate() {
        let mut record = Vec::with_capacity(header.len());
        for name in &header {
            let cell = match map.get(*name) {
                None => String::new(),
                Some(cell) => cell.leaf_text().ok_or_else(|| {
                    Error::shape(
                        Format::Csv,
                        format!("row {} field {:?} is a nested {}", idx, name, cell.type_name()),
                    )
                })?,
            };
            record.push(cell);
        }
        writer.write_record(&record).map_err(write_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::shape(Format::Csv, e.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| Error::shape(Format::Csv, e.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

fn write_error(e: ::csv::Error) -> Error {
    Error::shape(Format::Csv, e.to_string())
}
