//! FrenoLab Simulator Library
//!
//! Turns a scripted `RideScenario` into the per-second braking dataset:
//! build the time axis, overlay each braking event, normalize the
//! series, and read or write the CSV artifact.

pub mod dataset;
pub mod engine;
pub mod scenario;

pub use engine::{simulate, ScenarioError, SeriesBuilder};
pub use scenario::{BrakingEvent, RideScenario};
