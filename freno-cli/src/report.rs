//! Aggregate analysis of a braking dataset
//!
//! Computes the consumer-side metrics over a recorded ride: thermal
//! context, dissipated-energy totals and peaks, worst deceleration,
//! per-label tallies, and the maintenance verdict against the brake
//! stress thresholds.

use anyhow::Result;
use chrono::{DateTime, Utc};
use freno_core::units::{Celsius, Kilojoules, MetersPerSecondSquared};
use freno_core::{BrakeKind, TelemetrySample};
use freno_sim::dataset;
use serde::Serialize;
use std::path::Path;
use tracing::warn;

// =============================================================================
// Brake stress thresholds
// =============================================================================

/// Deceleration at or beyond which a sample counts as emergency-grade (m/s^2)
pub const EMERGENCY_DECELERATION_MS2: f64 = -8.0;

/// Per-sample energy share above which a braking peak can overheat the
/// system (kJ)
pub const VAPOR_LOCK_PEAK_KJ: f64 = 50.0;

/// Energy accumulated inside one rolling window that marks fade risk (kJ)
pub const FADE_ACCUMULATION_KJ: f64 = 300.0;

/// Rolling heat-accumulation window (s)
pub const FADE_WINDOW_S: u32 = 300;

/// Wet boiling point of service-worn DOT 4 brake fluid (C)
pub const VAPOR_LOCK_TEMP_C: f64 = 150.0;

/// Standard pad and disc inspection interval (km)
pub const STANDARD_INSPECTION_KM: u32 = 6000;

/// Shortened inspection interval advised after a stressed ride (km)
pub const ADVANCED_INSPECTION_KM: u32 = 3000;

// =============================================================================
// Report model
// =============================================================================

/// Which stress conditions the ride triggered
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StressFlags {
    /// Some sample decelerated at or beyond the emergency threshold
    pub emergency_braking: bool,
    /// A single sample's energy share exceeded the vapor-lock peak
    pub vapor_lock_risk: bool,
    /// A rolling window accumulated enough heat to risk brake fade
    pub fade_risk: bool,
}

impl StressFlags {
    pub fn any(self) -> bool {
        self.emergency_braking || self.vapor_lock_risk || self.fade_risk
    }
}

/// Sample count and dissipated energy for one brake kind
#[derive(Debug, Clone, Serialize)]
pub struct KindBreakdown {
    pub kind: BrakeKind,
    pub samples: usize,
    pub energy: Kilojoules,
}

/// Everything the report prints, serializable for `--json` output
#[derive(Debug, Clone, Serialize)]
pub struct RideReport {
    pub generated_at: DateTime<Utc>,
    pub sample_count: usize,
    pub braking_sample_count: usize,
    pub mean_ambient_temp: Celsius,
    pub final_ambient_temp: Celsius,
    pub total_energy: Kilojoules,
    /// Largest single-sample energy share
    pub peak_sample_energy: Kilojoules,
    /// Most negative deceleration seen
    pub peak_deceleration: MetersPerSecondSquared,
    /// Samples at or beyond EMERGENCY_DECELERATION_MS2
    pub high_deceleration_count: usize,
    /// Largest energy sum over any FADE_WINDOW_S stretch
    pub peak_window_energy: Kilojoules,
    pub by_kind: Vec<KindBreakdown>,
    pub flags: StressFlags,
    /// Recommended pad and disc inspection distance
    pub inspection_km: u32,
}

impl RideReport {
    /// Aggregate a dataset; an empty series produces the zeroed report
    pub fn from_samples(samples: &[TelemetrySample]) -> Self {
        let sample_count = samples.len();
        let braking_sample_count = samples.iter().filter(|s| s.brake_kind.is_braking()).count();

        let mean_ambient_temp = if samples.is_empty() {
            Celsius(0.0)
        } else {
            Celsius(samples.iter().map(|s| s.ambient_temp.0).sum::<f64>() / sample_count as f64)
        };
        let final_ambient_temp = samples.last().map_or(Celsius(0.0), |s| s.ambient_temp);

        let total_energy = Kilojoules(samples.iter().map(|s| s.dissipated_energy.0).sum());
        let peak_sample_energy = Kilojoules(
            samples
                .iter()
                .map(|s| s.dissipated_energy.0)
                .fold(0.0, f64::max),
        );
        let peak_deceleration = MetersPerSecondSquared(
            samples.iter().map(|s| s.deceleration.0).fold(0.0, f64::min),
        );
        let high_deceleration_count = samples
            .iter()
            .filter(|s| s.deceleration.0 <= EMERGENCY_DECELERATION_MS2)
            .count();
        let peak_window_energy = Kilojoules(peak_rolling_energy(samples, FADE_WINDOW_S));

        let by_kind = BrakeKind::ALL
            .iter()
            .map(|&kind| KindBreakdown {
                kind,
                samples: samples.iter().filter(|s| s.brake_kind == kind).count(),
                energy: Kilojoules(
                    samples
                        .iter()
                        .filter(|s| s.brake_kind == kind)
                        .map(|s| s.dissipated_energy.0)
                        .sum(),
                ),
            })
            .collect();

        let flags = StressFlags {
            emergency_braking: high_deceleration_count > 0,
            vapor_lock_risk: peak_sample_energy.0 > VAPOR_LOCK_PEAK_KJ,
            fade_risk: peak_window_energy.0 > FADE_ACCUMULATION_KJ,
        };
        let inspection_km = if flags.any() {
            ADVANCED_INSPECTION_KM
        } else {
            STANDARD_INSPECTION_KM
        };

        Self {
            generated_at: Utc::now(),
            sample_count,
            braking_sample_count,
            mean_ambient_temp,
            final_ambient_temp,
            total_energy,
            peak_sample_energy,
            peak_deceleration,
            high_deceleration_count,
            peak_window_energy,
            by_kind,
            flags,
            inspection_km,
        }
    }

    /// One-line maintenance verdict naming the fired stress flags
    pub fn verdict(&self) -> String {
        if self.sample_count == 0 {
            return "no data".to_string();
        }
        if !self.flags.any() {
            return format!(
                "no stress signature, standard inspection at {} km holds",
                STANDARD_INSPECTION_KM
            );
        }

        let mut reasons = Vec::new();
        if self.flags.emergency_braking {
            reasons.push("emergency-grade deceleration");
        }
        if self.flags.vapor_lock_risk {
            reasons.push("vapor-lock energy peak");
        }
        if self.flags.fade_risk {
            reasons.push("sustained heat accumulation");
        }
        format!(
            "stress signature ({}), advance pad and disc inspection to {} km",
            reasons.join(", "),
            self.inspection_km
        )
    }

    /// Render the human-readable report block
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if self.sample_count == 0 {
            out.push_str("Braking stress report: no data\n");
            out.push_str(&format!(
                "  no dataset rows to analyze; the standard inspection at {} km applies\n",
                self.inspection_km
            ));
            return out;
        }

        out.push_str(&format!(
            "Braking stress report ({} samples, {} under braking)\n",
            self.sample_count, self.braking_sample_count
        ));
        out.push_str(&format!(
            "  ambient temperature:  mean {:.1} C, final {:.1} C\n",
            self.mean_ambient_temp.0, self.final_ambient_temp.0
        ));
        out.push_str(&format!(
            "  dissipated energy:    total {:.1} kJ, peak sample {:.1} kJ (vapor-lock above {:.0} kJ, fluid boils near {:.0} C)\n",
            self.total_energy.0, self.peak_sample_energy.0, VAPOR_LOCK_PEAK_KJ, VAPOR_LOCK_TEMP_C
        ));
        out.push_str(&format!(
            "  peak deceleration:    {:.2} m/s2 ({} samples at or beyond {:.1} m/s2)\n",
            self.peak_deceleration.0, self.high_deceleration_count, EMERGENCY_DECELERATION_MS2
        ));
        out.push_str(&format!(
            "  heat accumulation:    {:.1} kJ over the worst {} s stretch (fade above {:.0} kJ)\n",
            self.peak_window_energy.0, FADE_WINDOW_S, FADE_ACCUMULATION_KJ
        ));
        out.push_str("  samples by brake kind:\n");
        for entry in &self.by_kind {
            out.push_str(&format!(
                "    {:<11} {:>5} samples  {:>9.1} kJ\n",
                entry.kind.as_str(),
                entry.samples,
                entry.energy.0
            ));
        }
        out.push_str(&format!("  verdict: {}\n", self.verdict()));
        out
    }
}

/// Load a dataset for reporting, treating a missing file as "no data"
///
/// Only absence degrades to the empty series; a file that exists but
/// cannot be parsed is still an error.
pub fn load_samples_or_empty(path: &Path) -> Result<Vec<TelemetrySample>> {
    if !path.exists() {
        warn!(path = %path.display(), "dataset not found, reporting no data");
        return Ok(Vec::new());
    }
    dataset::read_csv(path)
}

/// Largest energy sum over any trailing stretch of `window_s` seconds
///
/// Each window ends at a sample and covers `(t - window_s, t]`. Samples
/// must be in ascending time order, which the dataset contract
/// guarantees.
fn peak_rolling_energy(samples: &[TelemetrySample], window_s: u32) -> f64 {
    let mut peak = 0.0_f64;
    let mut sum = 0.0_f64;
    let mut tail = 0;

    for sample in samples {
        sum += sample.dissipated_energy.0;
        while sample.elapsed_s - samples[tail].elapsed_s >= window_s {
            sum -= samples[tail].dissipated_energy.0;
            tail += 1;
        }
        peak = peak.max(sum);
    }
    peak
}

#[cfg(test)]
mod tests {
    use super::*;
    use freno_core::units::KilometersPerHour;

    fn energy_sample(elapsed_s: u32, energy_kj: f64) -> TelemetrySample {
        TelemetrySample {
            elapsed_s,
            speed: KilometersPerHour(50.0),
            deceleration: MetersPerSecondSquared(-1.0),
            dissipated_energy: Kilojoules(energy_kj),
            brake_kind: BrakeKind::Suave,
            ambient_temp: Celsius(20.0),
        }
    }

    #[test]
    fn test_rolling_energy_empty_series() {
        assert_eq!(peak_rolling_energy(&[], FADE_WINDOW_S), 0.0);
    }

    #[test]
    fn test_rolling_energy_groups_samples_inside_the_window() {
        // 100 + 150 + 60 land within one 300 s stretch; the late sample
        // stands alone
        let samples = vec![
            energy_sample(0, 100.0),
            energy_sample(200, 150.0),
            energy_sample(299, 60.0),
            energy_sample(900, 200.0),
        ];
        let peak = peak_rolling_energy(&samples, 300);
        assert!((peak - 310.0).abs() < 1e-9);
    }

    #[test]
    fn test_rolling_energy_drops_samples_exactly_one_window_old() {
        // The window ending at t=300 no longer contains t=0
        let samples = vec![energy_sample(0, 100.0), energy_sample(300, 150.0)];
        let peak = peak_rolling_energy(&samples, 300);
        assert!((peak - 150.0).abs() < 1e-9);
    }
}
