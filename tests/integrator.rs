use std::ops::ControlFlow;

use stellar_accretion::constants::SOLAR_RADIUS_M;
use stellar_accretion::integrator::{
    Integrator, Observer, ObserverSet, SimulationConfig, SimulationConfigError, TickSnapshot,
    conserve_momentum,
};
use stellar_accretion::physics::{acceleration_at, accreted_mass_over_step};
use stellar_accretion::presets::HEAVIEST_PLANET_KG;
use stellar_accretion::profile::{ProfileSample, StellarProfile};
use stellar_accretion::vector;

fn three_shell_profile() -> StellarProfile {
    StellarProfile::new(vec![
        ProfileSample {
            radius_fraction: 0.1,
            density_kg_m3: 100.0,
            mass_fraction: 0.01,
        },
        ProfileSample {
            radius_fraction: 0.5,
            density_kg_m3: 10.0,
            mass_fraction: 0.5,
        },
        ProfileSample {
            radius_fraction: 1.0,
            density_kg_m3: 1.0,
            mass_fraction: 1.0,
        },
    ])
    .expect("valid profile")
}

/// A profile dense enough that accretion visibly changes the mass every step.
fn dense_profile() -> StellarProfile {
    StellarProfile::new(vec![
        ProfileSample {
            radius_fraction: 0.05,
            density_kg_m3: 5.0e9,
            mass_fraction: 0.05,
        },
        ProfileSample {
            radius_fraction: 0.6,
            density_kg_m3: 1.0e9,
            mass_fraction: 0.6,
        },
        ProfileSample {
            radius_fraction: 1.0,
            density_kg_m3: 1.0e8,
            mass_fraction: 1.0,
        },
    ])
    .expect("valid profile")
}

struct StopAt(u64);

impl Observer for StopAt {
    fn on_tick(&mut self, snapshot: &TickSnapshot) -> ControlFlow<()> {
        if snapshot.iteration >= self.0 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

#[derive(Default)]
struct Count(u64);

impl Observer for Count {
    fn on_tick(&mut self, _snapshot: &TickSnapshot) -> ControlFlow<()> {
        self.0 += 1;
        ControlFlow::Continue(())
    }
}

#[test]
fn single_tick_from_the_surface() {
    let profile = three_shell_profile();
    let config =
        SimulationConfig::new([0.0, 1.0], [1000.0, 0.0], HEAVIEST_PLANET_KG).with_time_step(1.0);
    assert_eq!(config.disc_multiplier, 2.0);
    let mut integrator = Integrator::new(&profile, config).expect("valid config");

    let snapshot = integrator.step();
    assert_eq!(snapshot.iteration, 1);
    assert_eq!(snapshot.state.elapsed_time_s, 1.0);
    assert_eq!(snapshot.acceleration_m_s2[0], 0.0);
    assert!(snapshot.acceleration_m_s2[1] < 0.0);
    assert!(snapshot.accreted_mass_kg.is_finite());
    assert!(snapshot.accreted_mass_kg >= 0.0);
    // the object fell inward during the step
    assert!(snapshot.state.position[1] < 1.0);
    assert!(snapshot.state.velocity_m_s[1] < 0.0);
}

#[test]
fn step_follows_kick_drift_accrete_rescale() {
    let profile = dense_profile();
    let config = SimulationConfig::new([0.3, 0.2], [2.0e4, -5.0e3], 1.0e27)
        .with_disc_multiplier(50.0)
        .with_time_step(10.0);
    let mut integrator = Integrator::new(&profile, config).expect("valid config");
    let dt = config.time_step_s;

    let acc = acceleration_at(&profile, &config.initial_position);
    let kicked = vector::add(&config.initial_velocity_m_s, &vector::scale(&acc, dt));
    let drifted = vector::add(
        &config.initial_position,
        &vector::scale(&kicked, dt / SOLAR_RADIUS_M),
    );
    let eaten = accreted_mass_over_step(
        &profile,
        &drifted,
        &kicked,
        config.initial_mass_kg,
        config.disc_multiplier,
        dt,
    );
    assert!(eaten > 0.0);
    let new_mass = config.initial_mass_kg + eaten;

    let snapshot = integrator.step();
    assert_eq!(snapshot.acceleration_m_s2, acc);
    assert_eq!(snapshot.state.position, drifted);
    assert_eq!(snapshot.accreted_mass_kg, eaten);
    assert_eq!(snapshot.state.compact_object_mass_kg, new_mass);
    for axis in 0..2 {
        let expected = kicked[axis] * config.initial_mass_kg / new_mass;
        assert!((snapshot.state.velocity_m_s[axis] - expected).abs() <= 1e-9 * expected.abs());
    }
    // momentum across the mass change is preserved
    let before = config.initial_mass_kg * vector::norm(&kicked);
    let after = new_mass * snapshot.state.speed_m_s();
    assert!((before - after).abs() <= 1e-12 * before);
}

#[test]
fn momentum_rescaling_preserves_mass_times_speed() {
    let cases = [
        ([3.0, 4.0], 2.0, 5.0),
        ([-1.0e5, 2.5e4], 2.47e28, 2.4700001e28),
        ([0.0, -7.0], 1.0, 1.0 + 1.0e-9),
    ];
    for (velocity, old_mass, new_mass) in cases {
        let rescaled = conserve_momentum(&velocity, old_mass, new_mass);
        let before = old_mass * vector::norm(&velocity);
        let after = new_mass * vector::norm(&rescaled);
        assert!(
            (before - after).abs() <= 1e-12 * before,
            "momentum {before} became {after}"
        );
        assert!(vector::norm(&rescaled) < vector::norm(&velocity));
    }
}

#[test]
fn mass_is_recomputed_from_initial_plus_accreted() {
    let profile = dense_profile();
    let config = SimulationConfig::new([0.4, 0.0], [0.0, 3.0e5], 1.0e27)
        .with_disc_multiplier(50.0)
        .with_time_step(5.0);
    let mut integrator = Integrator::new(&profile, config).expect("valid config");

    let mut previous_mass = config.initial_mass_kg;
    let mut previous_accreted = 0.0;
    for tick in 1..=500u64 {
        let snapshot = integrator.step();
        let state = snapshot.state;
        assert_eq!(
            state.compact_object_mass_kg,
            config.initial_mass_kg + state.cumulative_accreted_mass_kg
        );
        assert!(state.compact_object_mass_kg >= previous_mass);
        assert!(state.cumulative_accreted_mass_kg >= previous_accreted);
        assert_eq!(state.elapsed_time_s, tick as f64 * 5.0);
        previous_mass = state.compact_object_mass_kg;
        previous_accreted = state.cumulative_accreted_mass_kg;
    }
    assert!(previous_accreted > 0.0);
}

#[test]
fn runs_are_deterministic() {
    let profile = StellarProfile::from_csv_path("data/sun_stats.csv").expect("bundled profile");
    let config = SimulationConfig::new([-0.5, 0.5], [1.5e5, 0.0], HEAVIEST_PLANET_KG);

    let mut first = Integrator::new(&profile, config).expect("valid config");
    let mut second = Integrator::new(&profile, config).expect("valid config");
    let a = first.run(&mut Count::default(), Some(2_000));
    let b = second.run(&mut Count::default(), Some(2_000));
    assert_eq!(a, b);
    assert_eq!(a.ticks, 2_000);
    assert!(!a.stopped_by_observer);
    assert_eq!(first.state(), second.state());
}

#[test]
fn observer_break_ends_the_run_after_the_current_tick() {
    let profile = three_shell_profile();
    let config = SimulationConfig::new([0.0, 0.8], [5.0e4, 0.0], HEAVIEST_PLANET_KG);
    let mut integrator = Integrator::new(&profile, config).expect("valid config");

    let outcome = integrator.run(&mut StopAt(7), None);
    assert_eq!(outcome.ticks, 7);
    assert!(outcome.stopped_by_observer);
    assert_eq!(integrator.iteration(), 7);
    assert_eq!(outcome.final_state.elapsed_time_s, 35.0);
    assert_eq!(&outcome.final_state, integrator.state());

    let limited = integrator.run(&mut Count::default(), Some(3));
    assert_eq!(limited.ticks, 3);
    assert!(!limited.stopped_by_observer);
    assert_eq!(integrator.iteration(), 10);
}

#[test]
fn observer_set_notifies_everyone_before_stopping() {
    let profile = three_shell_profile();
    let config = SimulationConfig::new([0.0, 0.8], [5.0e4, 0.0], HEAVIEST_PLANET_KG);
    let mut integrator = Integrator::new(&profile, config).expect("valid config");

    let mut counter = Count::default();
    let outcome = {
        let mut observers = ObserverSet::new().with(StopAt(4)).with(&mut counter);
        assert_eq!(observers.len(), 2);
        integrator.run(&mut observers, Some(100))
    };
    assert_eq!(outcome.ticks, 4);
    assert!(outcome.stopped_by_observer);
    assert_eq!(counter.0, 4);
}

#[test]
fn invalid_configurations_are_rejected() {
    let profile = three_shell_profile();
    let base = SimulationConfig::new([0.0, 0.8], [5.0e4, 0.0], HEAVIEST_PLANET_KG);

    let cases = [
        (
            SimulationConfig {
                initial_mass_kg: 0.0,
                ..base
            },
            SimulationConfigError::NonPositiveMass(0.0),
        ),
        (
            base.with_time_step(-1.0),
            SimulationConfigError::NonPositiveTimeStep(-1.0),
        ),
        (
            base.with_disc_multiplier(0.0),
            SimulationConfigError::NonPositiveDiscMultiplier(0.0),
        ),
        (
            SimulationConfig {
                initial_position: [0.0, 0.0],
                ..base
            },
            SimulationConfigError::StartsAtOrigin,
        ),
        (
            SimulationConfig {
                initial_velocity_m_s: [f64::NAN, 0.0],
                ..base
            },
            SimulationConfigError::NonFinite("initial velocity"),
        ),
    ];
    for (config, expected) in cases {
        assert_eq!(config.validate(), Err(expected.clone()));
        assert_eq!(Integrator::new(&profile, config).err(), Some(expected));
    }
}
