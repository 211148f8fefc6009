//! Location reference data and rate area resolution

mod data;
pub mod loader;
pub mod resolver;

pub use data::{Location, Granularity, ResolvedArea, RequestedLocation};
pub use loader::{load_locations, load_locations_from_reader, load_requested, load_requested_from_reader};
pub use resolver::resolve;
