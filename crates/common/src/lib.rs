pub mod config;
pub mod error;
pub mod place;

pub use error::{Result, WaypointError};
