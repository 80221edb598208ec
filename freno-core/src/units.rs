//! Type-safe wrappers for physical units
//!
//! This module provides newtype wrappers around f64 to ensure
//! type safety and prevent unit confusion between the simulator
//! and dataset consumers.
//!
//! All unit types serialize with 4 decimal places to keep generated
//! artifacts compact.

use serde::{Deserialize, Serialize};

/// Round f64 to 4 decimal places for compact serialization
fn round4<S: serde::Serializer>(val: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64((*val * 10000.0).round() / 10000.0)
}

/// Kilometers per hour (road speeds, as riders read them)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KilometersPerHour(#[serde(serialize_with = "round4")] pub f64);

impl KilometersPerHour {
    /// Convert to m/s for kinematic formulas
    pub fn to_meters_per_second(self) -> MetersPerSecond {
        const KMH_PER_MS: f64 = 3.6;
        MetersPerSecond(self.0 / KMH_PER_MS)
    }
}

/// Meters per second
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetersPerSecond(#[serde(serialize_with = "round4")] pub f64);

/// Meters per second squared (acceleration)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetersPerSecondSquared(#[serde(serialize_with = "round4")] pub f64);

/// Kilojoules (dissipated braking energy)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kilojoules(#[serde(serialize_with = "round4")] pub f64);

impl Kilojoules {
    pub fn from_joules(joules: f64) -> Self {
        Self(joules / 1000.0)
    }
}

/// Celsius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Celsius(#[serde(serialize_with = "round4")] pub f64);

/// Kilograms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kilograms(#[serde(serialize_with = "round4")] pub f64);
