//! SLCSP - Second lowest cost Silver plan rates
//!
//! This library provides:
//! - Typed loading of the location, plan and requested-location tables
//! - Rate area resolution for ZIP codes and counties
//! - The second-lowest distinct Silver rate per rate area
//! - Batch orchestration and CSV output

pub mod error;
pub mod events;
pub mod location;
pub mod plan;
pub mod rates;
pub mod batch;

// Re-export commonly used types
pub use error::{SlcspError, Result};
pub use events::{RateEvent, RateObserver, LogObserver, NullObserver};
pub use location::{Location, Granularity, ResolvedArea, RequestedLocation, resolve};
pub use plan::{Plan, MetalLevel};
pub use rates::{RateResult, compute_slcsp, rate_for_area};
pub use batch::{RunConfig, DataFiles, RateRow, process_requested, process_all_counties, run};
