//! FrenoLab CLI Library
//!
//! Exposes the report and chart components for integration testing.

pub mod chart;
pub mod report;
