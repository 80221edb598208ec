//! Braking-telemetry series engine
//!
//! Builds the ride's time axis, overlays each scripted braking event on
//! its window, and runs the finalize passes that settle speed fill,
//! phase labels, and physical clamps. The whole computation is a pure
//! fold over one owned buffer: `SeriesBuilder::new`, one `apply_event`
//! per scripted maneuver, then `finalize`.

use crate::scenario::{BrakingEvent, RideScenario};
use freno_core::units::{Celsius, Kilograms, Kilojoules, KilometersPerHour, MetersPerSecondSquared};
use freno_core::{BrakeKind, TelemetrySample};
use thiserror::Error;
use tracing::debug;

/// Scenario shapes the engine cannot run
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    /// The time axis would need infinitely many samples
    #[error("sample interval must be at least 1 s")]
    ZeroSampleInterval,
}

/// In-flight sample state
///
/// Speed and label stay unset until a braking event or a finalize pass
/// assigns them. Keeping "never driven" distinct from a measured
/// 0 km/h lets a genuine full stop forward-fill like any other value.
#[derive(Debug, Clone, Copy)]
struct WorkingSample {
    elapsed_s: u32,
    speed: Option<KilometersPerHour>,
    deceleration: MetersPerSecondSquared,
    dissipated_energy: Kilojoules,
    label: Option<BrakeKind>,
    ambient_temp: Celsius,
}

/// Mutable series buffer the simulation folds over
#[derive(Debug)]
pub struct SeriesBuilder {
    mass: Kilograms,
    samples: Vec<WorkingSample>,
    /// Samples strictly before this time are labeled Reposo at finalize
    rest_before_s: u32,
}

impl SeriesBuilder {
    /// Initialize the time axis from a scenario
    ///
    /// Every sample starts with speed and label unset, zero deceleration
    /// and energy, and its ambient temperature interpolated linearly from
    /// the scenario's departure value to its arrival value.
    pub fn new(scenario: &RideScenario) -> Result<Self, ScenarioError> {
        if scenario.sample_interval_s == 0 {
            return Err(ScenarioError::ZeroSampleInterval);
        }

        let count = scenario.duration_s.div_ceil(scenario.sample_interval_s) as usize;
        let cooling_per_s =
            (scenario.initial_temp.0 - scenario.final_temp.0) / scenario.duration_s as f64;

        let samples = (0..count)
            .map(|k| {
                let t = k as u32 * scenario.sample_interval_s;
                WorkingSample {
                    elapsed_s: t,
                    speed: None,
                    deceleration: MetersPerSecondSquared(0.0),
                    dissipated_energy: Kilojoules(0.0),
                    label: None,
                    ambient_temp: Celsius(scenario.initial_temp.0 - t as f64 * cooling_per_s),
                }
            })
            .collect();

        Ok(Self {
            mass: scenario.mass,
            samples,
            rest_before_s: scenario
                .events
                .first()
                .map_or(u32::MAX, |event| event.start_s),
        })
    }

    /// Overlay one braking event on its time window
    ///
    /// The window holds the samples with `start <= t < start + duration`.
    /// An empty window (zero duration, or an event starting at or past the
    /// end of the ride) is a no-op. Overlapping events overwrite: the last
    /// applied event wins on shared samples.
    pub fn apply_event(&mut self, event: &BrakingEvent) {
        let event = event.sanitized();
        let end_s = event.start_s.saturating_add(event.duration_s);

        let mut window: Vec<&mut WorkingSample> = self
            .samples
            .iter_mut()
            .filter(|sample| sample.elapsed_s >= event.start_s && sample.elapsed_s < end_s)
            .collect();
        let n = window.len();
        if n == 0 {
            debug!(
                start_s = event.start_s,
                duration_s = event.duration_s,
                "braking event window holds no samples, skipping"
            );
            return;
        }

        let v0 = event.initial_speed.to_meters_per_second();
        let v1 = event.final_speed.to_meters_per_second();

        // One constant deceleration for the whole window, taken from the
        // nominal duration. The dissipated energy is the event's total
        // kinetic loss split evenly over the samples the window actually
        // holds, so a window truncated by the end of the ride carries the
        // same total heat in fewer samples.
        let deceleration = MetersPerSecondSquared((v1.0 - v0.0) / event.duration_s as f64);
        let total_energy_j = 0.5 * self.mass.0 * (v0.0 * v0.0 - v1.0 * v1.0);
        let energy_share = Kilojoules::from_joules(total_energy_j / n as f64);

        for (i, sample) in window.iter_mut().enumerate() {
            let kmh = linstep(event.initial_speed.0, event.final_speed.0, i, n);
            sample.speed = Some(KilometersPerHour(kmh));
            sample.deceleration = deceleration;
            sample.dissipated_energy = energy_share;
            sample.label = Some(event.kind);
        }

        debug!(
            start_s = event.start_s,
            samples = n,
            kind = %event.kind,
            deceleration_ms2 = deceleration.0,
            "applied braking event"
        );
    }

    /// Run the normalization passes and produce the final series
    ///
    /// Pass order is part of the contract for malformed scripts: the
    /// cruise label reads the deceleration before the sign clamp zeroes
    /// bad values, so a sample whose positive deceleration gets clamped
    /// still keeps its event label.
    pub fn finalize(self) -> Vec<TelemetrySample> {
        let rest_before_s = self.rest_before_s;
        let mut last_speed: Option<KilometersPerHour> = None;

        self.samples
            .into_iter()
            .map(|sample| {
                // Speed: forward-fill from the last assigned value. Samples
                // before any assignment rest at 0.
                let speed = match sample.speed {
                    Some(v) => {
                        last_speed = Some(v);
                        v
                    }
                    None => last_speed.unwrap_or(KilometersPerHour(0.0)),
                };

                // Labels: cruising wherever no deceleration is in effect,
                // and at rest before the first scripted event regardless.
                let mut label = if sample.deceleration.0 == 0.0 {
                    BrakeKind::Crucero
                } else {
                    sample.label.unwrap_or(BrakeKind::Crucero)
                };
                if sample.elapsed_s < rest_before_s {
                    label = BrakeKind::Reposo;
                }

                // Physical clamps: deceleration is never positive, energy
                // never negative, and neither keeps a non-finite value.
                let mut deceleration = sample.deceleration;
                if !deceleration.0.is_finite() || deceleration.0 > 0.0 {
                    deceleration = MetersPerSecondSquared(0.0);
                }
                let mut dissipated_energy = sample.dissipated_energy;
                if !dissipated_energy.0.is_finite() || dissipated_energy.0 < 0.0 {
                    dissipated_energy = Kilojoules(0.0);
                }

                // Idle phases dissipate no braking heat
                if matches!(label, BrakeKind::Reposo | BrakeKind::Crucero) {
                    dissipated_energy = Kilojoules(0.0);
                }

                TelemetrySample {
                    elapsed_s: sample.elapsed_s,
                    speed,
                    deceleration,
                    dissipated_energy,
                    brake_kind: label,
                    ambient_temp: sample.ambient_temp,
                }
            })
            .collect()
    }
}

/// Run a whole scenario: initialize, apply every event in order, finalize
pub fn simulate(scenario: &RideScenario) -> Result<Vec<TelemetrySample>, ScenarioError> {
    let mut builder = SeriesBuilder::new(scenario)?;
    for event in &scenario.events {
        builder.apply_event(event);
    }
    Ok(builder.finalize())
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Value `i` of an inclusive `n`-point ramp from `a` to `b`
///
/// The first point is exactly `a` and the last exactly `b`; a single-point
/// ramp collapses to `a`.
fn linstep(a: f64, b: f64, i: usize, n: usize) -> f64 {
    if n <= 1 {
        return a;
    }
    lerp(a, b, i as f64 / (n - 1) as f64)
}
