//! CSV loading for the location and requested-location tables

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;
use serde::de::DeserializeOwned;

use super::{Location, RequestedLocation};
use crate::error::{Result, SlcspError};

/// Load the location reference table from a CSV file with a header row
pub fn load_locations(path: &Path) -> Result<Vec<Location>> {
    let rows: Vec<Location> = load_table(path)?;
    debug!("Loaded {} location rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load the location reference table from any reader
pub fn load_locations_from_reader<R: Read>(reader: R) -> Result<Vec<Location>> {
    read_table(reader).map_err(SlcspError::Parse)
}

/// Load the requested-locations table from a CSV file with a header row
pub fn load_requested(path: &Path) -> Result<Vec<RequestedLocation>> {
    let rows: Vec<RequestedLocation> = load_table(path)?;
    debug!("Loaded {} requested locations from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load the requested-locations table from any reader
pub fn load_requested_from_reader<R: Read>(reader: R) -> Result<Vec<RequestedLocation>> {
    read_table(reader).map_err(SlcspError::Parse)
}

/// Open `path` and deserialize every row, attaching the path to any error.
/// Shared with the plan loader.
pub(crate) fn load_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|source| SlcspError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_table(file).map_err(|source| SlcspError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn read_table<T: DeserializeOwned, R: Read>(reader: R) -> std::result::Result<Vec<T>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    rdr.deserialize().collect()
}
