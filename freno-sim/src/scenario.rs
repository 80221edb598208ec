//! Ride scenarios: the scripted braking events a simulation replays
//!
//! A scenario is the entire configuration surface of the simulator. It
//! fixes the vehicle mass, the time axis, the ambient thermal gradient,
//! and the ordered list of braking maneuvers. Scenarios round-trip
//! through JSON so alternative rides can be supplied without recompiling.

use freno_core::units::{Celsius, Kilograms, KilometersPerHour};
use freno_core::BrakeKind;
use serde::{Deserialize, Serialize};
use tracing::warn;

// =============================================================================
// Braking events
// =============================================================================

/// One scripted braking maneuver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrakingEvent {
    /// Second of the ride at which braking starts
    pub start_s: u32,
    /// Speed entering the event
    pub initial_speed: KilometersPerHour,
    /// Target speed when the event ends
    pub final_speed: KilometersPerHour,
    /// Nominal event length in seconds
    pub duration_s: u32,
    /// Severity label stamped on every sample of the window
    pub kind: BrakeKind,
}

impl BrakingEvent {
    pub fn new(start_s: u32, initial_kmh: f64, final_kmh: f64, duration_s: u32, kind: BrakeKind) -> Self {
        Self {
            start_s,
            initial_speed: KilometersPerHour(initial_kmh),
            final_speed: KilometersPerHour(final_kmh),
            duration_s,
            kind,
        }
    }

    /// A braking event must slow the vehicle down. Events scripted with
    /// `final >= initial` are corrected to end at 10% of the entry speed
    /// rather than rejected, so one bad line cannot abort a whole ride.
    pub(crate) fn sanitized(mut self) -> Self {
        if self.initial_speed.0 <= self.final_speed.0 {
            let corrected = KilometersPerHour(self.initial_speed.0 * 0.1);
            warn!(
                start_s = self.start_s,
                initial_kmh = self.initial_speed.0,
                final_kmh = self.final_speed.0,
                corrected_kmh = corrected.0,
                "braking event does not slow down, correcting final speed"
            );
            self.final_speed = corrected;
        }
        self
    }
}

// =============================================================================
// Ride scenario
// =============================================================================

/// Full configuration for one simulated ride
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideScenario {
    /// Combined vehicle, rider, and luggage mass
    pub mass: Kilograms,
    /// Length of the ride in seconds
    pub duration_s: u32,
    /// Seconds between consecutive samples
    pub sample_interval_s: u32,
    /// Ambient temperature at departure
    pub initial_temp: Celsius,
    /// Ambient temperature at arrival
    pub final_temp: Celsius,
    /// Scripted braking events, applied in list order
    pub events: Vec<BrakingEvent>,
}

impl RideScenario {
    /// The documented one-hour reference ride
    ///
    /// An urban stretch with progressive stops, one emergency stop at
    /// mid-route, a motorway section, and a downhill cluster of brakes
    /// with no recovery time between them. Ambient temperature falls
    /// from a warm valley floor to a cooler mountain pass.
    pub fn reference_hour() -> Self {
        Self {
            // 180 kg motorcycle, 70 kg rider, 50 kg luggage
            mass: Kilograms(300.0),
            duration_s: 3600,
            sample_interval_s: 1,
            initial_temp: Celsius(30.0),
            final_temp: Celsius(18.0),
            events: vec![
                // Urban stretch: anticipated, progressive stops
                BrakingEvent::new(300, 80.0, 50.0, 5, BrakeKind::Progresivo),
                BrakingEvent::new(350, 70.0, 0.0, 4, BrakeKind::Progresivo),
                BrakingEvent::new(700, 60.0, 40.0, 3, BrakeKind::Suave),
                BrakingEvent::new(750, 50.0, 0.0, 3, BrakeKind::Progresivo),
                // Emergency stop at mid-route
                BrakingEvent::new(1200, 100.0, 0.0, 3, BrakeKind::Emergencia),
                // Motorway section: high speed, firm corrections
                BrakingEvent::new(1800, 120.0, 90.0, 2, BrakeKind::Suave),
                BrakingEvent::new(2100, 130.0, 70.0, 3, BrakeKind::Brusco),
                BrakingEvent::new(2400, 90.0, 0.0, 4, BrakeKind::Progresivo),
                // Downhill cluster: consecutive brakes, no cooling window
                BrakingEvent::new(2800, 50.0, 30.0, 2, BrakeKind::Brusco),
                BrakingEvent::new(2810, 40.0, 20.0, 2, BrakeKind::Brusco),
                BrakingEvent::new(2820, 30.0, 0.0, 2, BrakeKind::Emergencia),
                // Final stop at destination
                BrakingEvent::new(3200, 80.0, 0.0, 5, BrakeKind::Progresivo),
            ],
        }
    }
}
