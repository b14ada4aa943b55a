use csv::ReaderBuilder;
use serde_json::{Map, Value};

use crate::error::Error;

pub mod endpoints;
pub use endpoints::*;

/// How many data rows of an uploaded file are kept as context.
pub const PAST_DATA_ROWS: usize = 3;

/// Turns an uploaded csv file into the `past_data` hint: the first row names
/// the columns, and the next three rows become a JSON array of objects.
pub fn past_data_from_csv(data: &[u8]) -> Result<String, Error> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(data);

    let headers = reader.headers().map_err(file_parse_error)?.clone();

    let mut rows = Vec::with_capacity(PAST_DATA_ROWS);
    for record in reader.records().take(PAST_DATA_ROWS) {
        let record = record.map_err(file_parse_error)?;
        let row: Map<String, Value> = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_owned(), Value::String(value.to_owned())))
            .collect();
        rows.push(Value::Object(row));
    }

    Ok(serde_json::to_string(&rows)?)
}

fn file_parse_error(err: csv::Error) -> Error {
    Error::FileParseError {
        reason: err.to_string(),
    }
}
