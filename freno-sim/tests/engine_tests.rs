//! Integration tests for the reference one-hour ride
//!
//! These exercise the full pipeline (initialize, apply every scripted
//! event, finalize) and pin the documented properties of the published
//! dataset.

use freno_core::units::KilometersPerHour;
use freno_core::BrakeKind;
use freno_sim::{simulate, RideScenario};

#[test]
fn test_reference_ride_has_one_sample_per_second() {
    let samples = simulate(&RideScenario::reference_hour()).expect("reference ride should run");
    assert_eq!(samples.len(), 3600, "one hour at 1 Hz should give 3600 rows");
    for (i, sample) in samples.iter().enumerate() {
        assert_eq!(sample.elapsed_s, i as u32, "times should be 0..=3599 in order");
    }
}

#[test]
fn test_ambient_temperature_follows_the_route_gradient() {
    let scenario = RideScenario::reference_hour();
    let samples = simulate(&scenario).expect("reference ride should run");

    let cooling_per_s = (scenario.initial_temp.0 - scenario.final_temp.0) / 3600.0;
    for sample in &samples {
        let expected = scenario.initial_temp.0 - sample.elapsed_s as f64 * cooling_per_s;
        assert!(
            (sample.ambient_temp.0 - expected).abs() < 1e-9,
            "temperature at t={} should sit on the linear gradient",
            sample.elapsed_s
        );
    }

    assert_eq!(samples[0].ambient_temp.0, 30.0);
    // The last sample sits one interval short of the full hour, so it is
    // one cooling step above the arrival temperature
    assert!((samples[3599].ambient_temp.0 - (18.0 + cooling_per_s)).abs() < 1e-9);
}

#[test]
fn test_emergency_stop_window_at_mid_route() {
    let samples = simulate(&RideScenario::reference_hour()).expect("reference ride should run");

    // Scripted: 100 km/h to full stop in 3 s at t=1200
    let v0 = KilometersPerHour(100.0).to_meters_per_second().0;
    let expected_decel = -v0 / 3.0;
    let expected_share = 0.5 * 300.0 * v0 * v0 / 3.0 / 1000.0;

    for t in 1200..1203 {
        let sample = &samples[t];
        assert_eq!(sample.brake_kind, BrakeKind::Emergencia);
        assert!(
            (sample.deceleration.0 - expected_decel).abs() < 1e-9,
            "deceleration at t={} should be {:.4} m/s2",
            t,
            expected_decel
        );
        assert!(
            (sample.dissipated_energy.0 - expected_share).abs() < 1e-9,
            "energy share at t={} should be {:.4} kJ",
            t,
            expected_share
        );
    }

    // The ramp runs 100, 50, 0 and the stop persists into the cruise
    assert_eq!(samples[1200].speed, KilometersPerHour(100.0));
    assert_eq!(samples[1201].speed, KilometersPerHour(50.0));
    assert_eq!(samples[1202].speed, KilometersPerHour(0.0));
    assert_eq!(samples[1203].speed, KilometersPerHour(0.0));
    assert_eq!(samples[1203].brake_kind, BrakeKind::Crucero);
}

#[test]
fn test_each_event_window_carries_its_kinetic_loss() {
    let scenario = RideScenario::reference_hour();
    let samples = simulate(&scenario).expect("reference ride should run");

    for event in &scenario.events {
        let v0 = event.initial_speed.to_meters_per_second().0;
        let v1 = event.final_speed.to_meters_per_second().0;
        let expected_total = 0.5 * scenario.mass.0 * (v0 * v0 - v1 * v1) / 1000.0;

        let window_total: f64 = samples
            .iter()
            .filter(|s| s.elapsed_s >= event.start_s && s.elapsed_s < event.start_s + event.duration_s)
            .map(|s| s.dissipated_energy.0)
            .sum();

        assert!(
            (window_total - expected_total).abs() < 1e-9,
            "event at t={} should dissipate {:.4} kJ, got {:.4}",
            event.start_s,
            expected_total,
            window_total
        );
    }
}

#[test]
fn test_event_windows_hold_label_and_constant_deceleration() {
    let scenario = RideScenario::reference_hour();
    let samples = simulate(&scenario).expect("reference ride should run");

    for event in &scenario.events {
        let v0 = event.initial_speed.to_meters_per_second().0;
        let v1 = event.final_speed.to_meters_per_second().0;
        let expected_decel = (v1 - v0) / event.duration_s as f64;

        let window: Vec<_> = samples
            .iter()
            .filter(|s| s.elapsed_s >= event.start_s && s.elapsed_s < event.start_s + event.duration_s)
            .collect();
        assert_eq!(
            window.len(),
            event.duration_s as usize,
            "reference events are never truncated"
        );

        for sample in window {
            assert_eq!(
                sample.brake_kind, event.kind,
                "sample at t={} should carry the event label",
                sample.elapsed_s
            );
            assert!(
                (sample.deceleration.0 - expected_decel).abs() < 1e-9,
                "deceleration at t={} should be the event constant {:.4}",
                sample.elapsed_s,
                expected_decel
            );
        }
    }
}

#[test]
fn test_total_energy_is_the_sum_over_events() {
    let scenario = RideScenario::reference_hour();
    let samples = simulate(&scenario).expect("reference ride should run");

    let expected_total: f64 = scenario
        .events
        .iter()
        .map(|event| {
            let v0 = event.initial_speed.to_meters_per_second().0;
            let v1 = event.final_speed.to_meters_per_second().0;
            0.5 * scenario.mass.0 * (v0 * v0 - v1 * v1) / 1000.0
        })
        .sum();

    let series_total: f64 = samples.iter().map(|s| s.dissipated_energy.0).sum();
    assert!(
        (series_total - expected_total).abs() < 1e-6,
        "series total {:.4} kJ should match the scripted events' {:.4} kJ",
        series_total,
        expected_total
    );
}

#[test]
fn test_physical_invariants_hold_everywhere() {
    let samples = simulate(&RideScenario::reference_hour()).expect("reference ride should run");

    for sample in &samples {
        assert!(
            sample.deceleration.0 <= 0.0,
            "deceleration at t={} should never be positive",
            sample.elapsed_s
        );
        assert!(
            sample.dissipated_energy.0 >= 0.0,
            "energy at t={} should never be negative",
            sample.elapsed_s
        );
        assert!(
            sample.speed.0 >= 0.0,
            "speed at t={} should never be negative",
            sample.elapsed_s
        );

        // Heat only flows inside braking windows
        if sample.brake_kind.is_braking() {
            assert!(
                sample.dissipated_energy.0 > 0.0,
                "braking sample at t={} should dissipate energy",
                sample.elapsed_s
            );
            assert!(
                sample.deceleration.0 < 0.0,
                "braking sample at t={} should decelerate",
                sample.elapsed_s
            );
        } else {
            assert_eq!(
                sample.dissipated_energy.0, 0.0,
                "idle sample at t={} should carry no braking heat",
                sample.elapsed_s
            );
        }
    }
}

#[test]
fn test_ride_phases_read_from_the_labels() {
    let samples = simulate(&RideScenario::reference_hour()).expect("reference ride should run");

    // At rest until the first scripted event at t=300
    for sample in &samples[..300] {
        assert_eq!(sample.brake_kind, BrakeKind::Reposo);
        assert_eq!(sample.speed, KilometersPerHour(0.0));
    }

    // First urban stop: 80 down to 50 over 5 samples
    let ramp: Vec<f64> = samples[300..305].iter().map(|s| s.speed.0).collect();
    assert_eq!(ramp, vec![80.0, 72.5, 65.0, 57.5, 50.0]);

    // Cruise holds the event's final speed until the next event
    for sample in &samples[305..350] {
        assert_eq!(sample.brake_kind, BrakeKind::Crucero);
        assert_eq!(sample.speed, KilometersPerHour(50.0));
    }

    // The second stop ends at 0 km/h and the stop persists through the
    // cruise that follows it
    assert_eq!(samples[353].speed, KilometersPerHour(0.0));
    for sample in &samples[354..700] {
        assert_eq!(sample.brake_kind, BrakeKind::Crucero);
        assert_eq!(sample.speed, KilometersPerHour(0.0));
    }

    // Downhill cluster keeps its per-event labels back to back
    assert_eq!(samples[2800].brake_kind, BrakeKind::Brusco);
    assert_eq!(samples[2810].brake_kind, BrakeKind::Brusco);
    assert_eq!(samples[2820].brake_kind, BrakeKind::Emergencia);
}
