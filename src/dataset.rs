//! CSV ingestion for mortality tables.
//!
//! Expected header: `Cause,State,Growth,LatestRate` plus any of the optional
//! `EarliestRate`, `Name`, `Lat`, `Long` columns. Blank or non-numeric
//! optional cells load as missing values.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::core::{MortalityRow, Table};
use crate::error::{ChartError, ChartResult};

pub fn load_table_from_path(path: impl AsRef<Path>) -> ChartResult<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| {
        ChartError::Io(std::io::Error::new(
            err.kind(),
            format!("failed to open `{}`: {err}", path.display()),
        ))
    })?;
    debug!(path = %path.display(), "loading mortality table");
    load_table_from_reader(file)
}

pub fn load_table_from_reader<R: Read>(reader: R) -> ChartResult<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.deserialize::<MortalityRow>() {
        rows.push(result?);
    }
    Table::new(rows)
}

pub fn load_table_from_str(input: &str) -> ChartResult<Table> {
    load_table_from_reader(input.as_bytes())
}
