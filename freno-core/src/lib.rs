//! FrenoLab Core Library
//!
//! This crate provides the shared data model for the braking telemetry
//! toolset: physical unit newtypes and the per-second sample contract
//! produced by the simulator and consumed by the report tooling.

pub mod model;
pub mod units;

pub use model::{BrakeKind, ParseBrakeKindError, TelemetrySample};
