//! Plan data structures and loading

mod data;
pub mod loader;

pub use data::{Plan, MetalLevel};
pub use loader::{load_plans, load_plans_from_reader};
