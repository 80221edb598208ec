//! Ride chart rendering
//!
//! One PNG with two stacked panels: the speed curve with its scaled
//! mechanical-stress envelope on top, and the per-sample dissipated
//! energy underneath, colored with the fixed per-label palette.
//!
//! Chart output is best effort. Rendering runs behind a panic guard and
//! any failure surfaces as an error for the caller to log and skip, so
//! a fontless or headless host never aborts dataset generation.

use anyhow::{anyhow, Result};
use freno_core::{BrakeKind, TelemetrySample};
use plotters::prelude::*;
use std::panic;
use std::path::Path;

/// Visual scale applied to |deceleration| when drawn over the speed curve
pub const DECELERATION_VISUAL_SCALE: f64 = 5.0;

/// Render the ride chart to `path`, guarding against backend panics
pub fn render_ride_chart(samples: &[TelemetrySample], path: &Path) -> Result<()> {
    let render = || draw_ride_chart(samples, path);
    match panic::catch_unwind(panic::AssertUnwindSafe(render)) {
        Ok(result) => result,
        Err(_) => Err(anyhow!("chart backend panicked")),
    }
}

fn draw_ride_chart(samples: &[TelemetrySample], path: &Path) -> Result<()> {
    if samples.is_empty() {
        return Ok(());
    }

    let stress = |s: &TelemetrySample| {
        s.speed.0 + s.deceleration.0.abs() * DECELERATION_VISUAL_SCALE
    };
    let x_max = samples.last().map_or(1.0, |s| s.elapsed_s as f64).max(1.0);
    let speed_max = samples.iter().map(stress).fold(1.0, f64::max) * 1.05;
    let energy_max = samples
        .iter()
        .map(|s| s.dissipated_energy.0)
        .fold(1.0, f64::max)
        * 1.1;

    let root = BitMapBackend::new(path, (1280, 760)).into_drawing_area();
    root.fill(&WHITE)?;
    let (upper, lower) = root.split_vertically(420);

    let mut speed_chart = ChartBuilder::on(&upper)
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 35)
        .build_cartesian_2d(0.0..x_max, 0.0..speed_max)?;
    speed_chart
        .configure_mesh()
        .x_desc("Tiempo (s)")
        .y_desc("Velocidad (km/h)")
        .draw()?;

    let speed_color = hex_color(BrakeKind::Suave.color());
    speed_chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.elapsed_s as f64, s.speed.0)),
            &speed_color,
        ))?
        .label("Velocidad (km/h)")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], speed_color));

    let stress_color = hex_color(BrakeKind::Emergencia.color());
    speed_chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.elapsed_s as f64, stress(s))),
            &stress_color,
        ))?
        .label("Estres mecanico (escalado)")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], stress_color));

    speed_chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.7))
        .border_style(&BLACK.mix(0.3))
        .draw()?;

    let mut energy_chart = ChartBuilder::on(&lower)
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 35)
        .build_cartesian_2d(0.0..x_max, 0.0..energy_max)?;
    energy_chart
        .configure_mesh()
        .x_desc("Tiempo (s)")
        .y_desc("Energia disipada (kJ)")
        .draw()?;

    for kind in BrakeKind::BRAKING {
        let color = hex_color(kind.color());
        let points: Vec<(f64, f64)> = samples
            .iter()
            .filter(|s| s.brake_kind == kind && s.dissipated_energy.0 > 0.0)
            .map(|s| (s.elapsed_s as f64, s.dissipated_energy.0))
            .collect();
        if points.is_empty() {
            continue;
        }

        energy_chart
            .draw_series(points.iter().map(|&(x, y)| {
                // Marker size tracks the energy share, within sane bounds
                let radius = (y / 5.0).clamp(2.0, 12.0) as i32;
                Circle::new((x, y), radius, color.filled())
            }))?
            .label(kind.as_str())
            .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
    }

    energy_chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.7))
        .border_style(&BLACK.mix(0.3))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Parse a "#RRGGBB" display color; anything else falls back to the
/// neutral grey of the idle phases
fn hex_color(hex: &str) -> RGBColor {
    fn parse(hex: &str) -> Option<RGBColor> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(digits.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(digits.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(digits.get(4..6)?, 16).ok()?;
        Some(RGBColor(r, g, b))
    }
    parse(hex).unwrap_or(RGBColor(0xBD, 0xC3, 0xC7))
}
