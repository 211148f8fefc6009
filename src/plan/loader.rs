//! CSV loading for the plan table

use std::io::Read;
use std::path::Path;

use log::debug;

use super::Plan;
use crate::error::{Result, SlcspError};
use crate::location::loader::{load_table, read_table};

/// Load plans from a CSV file with a header row
pub fn load_plans(path: &Path) -> Result<Vec<Plan>> {
    let plans: Vec<Plan> = load_table(path)?;
    debug!("Loaded {} plans from {}", plans.len(), path.display());
    Ok(plans)
}

/// Load plans from any reader
pub fn load_plans_from_reader<R: Read>(reader: R) -> Result<Vec<Plan>> {
    read_table(reader).map_err(SlcspError::Parse)
}
