use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::error::SchemaError;

/// Read the column header of a raw table file.
///
/// The first physical line is the file marker and is skipped; the second
/// line holds the column names.
pub fn read_header<P: AsRef<Path>>(path: P) -> Result<Vec<String>, SchemaError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_header_from(BufReader::new(file), &path.display().to_string())
}

/// Read the column header from any reader positioned at the marker line.
pub fn read_header_from<R: Read>(reader: R, source: &str) -> Result<Vec<String>, SchemaError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = csv_reader.records();
    // Marker line
    if records.next().transpose()?.is_none() {
        return Err(SchemaError::MissingHeader(source.to_string()));
    }

    let header = records
        .next()
        .transpose()?
        .ok_or_else(|| SchemaError::MissingHeader(source.to_string()))?;

    Ok(header.iter().map(|cell| cell.trim().to_string()).collect())
}
