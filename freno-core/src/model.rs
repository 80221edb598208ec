//! Braking telemetry data model
//!
//! Defines the per-second TelemetrySample that the simulator produces
//! and every consumer reads back, plus the braking severity labels.
//!
//! The serde renames pin the dataset column contract in one place:
//! field names serialize exactly as the published Spanish column
//! headers, so generator and consumers cannot drift apart.

use crate::units::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One sample of the ride, taken once per sampling interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Seconds elapsed since the start of the ride
    #[serde(rename = "Tiempo_s")]
    pub elapsed_s: u32,

    /// Instantaneous speed
    #[serde(rename = "Velocidad_kmh")]
    pub speed: KilometersPerHour,

    /// Deceleration in effect during a braking window, 0 elsewhere (never positive)
    #[serde(rename = "Deceleracion_ms2")]
    pub deceleration: MetersPerSecondSquared,

    /// This sample's even share of the surrounding event's kinetic energy loss
    #[serde(rename = "Energia_Disipada_kJ")]
    pub dissipated_energy: Kilojoules,

    /// Severity label for the sample
    #[serde(rename = "Tipo_Frenado")]
    pub brake_kind: BrakeKind,

    /// Ambient temperature along the route's thermal gradient
    #[serde(rename = "Temperatura_Ambiente_C")]
    pub ambient_temp: Celsius,
}

/// Braking severity labels
///
/// `Reposo` marks samples before the ride's first scripted event and
/// `Crucero` the cruising stretches between events; the remaining four
/// label samples inside a braking window, mildest to harshest. The
/// variant names are the literal strings stored in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrakeKind {
    Reposo,
    Crucero,
    Suave,
    Progresivo,
    Brusco,
    Emergencia,
}

impl BrakeKind {
    /// Every label, idle phases first, then mildest to harshest
    pub const ALL: [BrakeKind; 6] = [
        BrakeKind::Reposo,
        BrakeKind::Crucero,
        BrakeKind::Suave,
        BrakeKind::Progresivo,
        BrakeKind::Brusco,
        BrakeKind::Emergencia,
    ];

    /// The labels that mark an active braking window
    pub const BRAKING: [BrakeKind; 4] = [
        BrakeKind::Suave,
        BrakeKind::Progresivo,
        BrakeKind::Brusco,
        BrakeKind::Emergencia,
    ];

    /// Whether the sample sits inside a braking event window
    pub fn is_braking(self) -> bool {
        matches!(
            self,
            BrakeKind::Suave | BrakeKind::Progresivo | BrakeKind::Brusco | BrakeKind::Emergencia
        )
    }

    /// Fixed display color (hex RGB), shared by every chart of the dataset
    pub fn color(self) -> &'static str {
        match self {
            BrakeKind::Emergencia => "#E74C3C",
            BrakeKind::Brusco => "#F39C12",
            BrakeKind::Progresivo => "#3498DB",
            BrakeKind::Suave => "#1ABC9C",
            BrakeKind::Reposo | BrakeKind::Crucero => "#BDC3C7",
        }
    }

    /// The label string as stored in the dataset
    pub fn as_str(self) -> &'static str {
        match self {
            BrakeKind::Reposo => "Reposo",
            BrakeKind::Crucero => "Crucero",
            BrakeKind::Suave => "Suave",
            BrakeKind::Progresivo => "Progresivo",
            BrakeKind::Brusco => "Brusco",
            BrakeKind::Emergencia => "Emergencia",
        }
    }
}

impl fmt::Display for BrakeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a label string is not one of the six known kinds
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown brake kind label: {0:?}")]
pub struct ParseBrakeKindError(String);

impl FromStr for BrakeKind {
    type Err = ParseBrakeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Reposo" => Ok(BrakeKind::Reposo),
            "Crucero" => Ok(BrakeKind::Crucero),
            "Suave" => Ok(BrakeKind::Suave),
            "Progresivo" => Ok(BrakeKind::Progresivo),
            "Brusco" => Ok(BrakeKind::Brusco),
            "Emergencia" => Ok(BrakeKind::Emergencia),
            other => Err(ParseBrakeKindError(other.to_string())),
        }
    }
}
