use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use stellar_accretion::config::{MassPreset, RunConfig, load_run_config};
use stellar_accretion::export::telemetry;
use stellar_accretion::integrator::{Integrator, ObserverSet};
use stellar_accretion::presentation::{
    Hud, Pacer, StopSignal, TrajectoryRecorder, plot_trajectory,
};
use stellar_accretion::scenario;
use stellar_accretion::units::seconds_to_years;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Simulate a compact object falling through a star and accreting as it goes"
)]
struct Cli {
    /// Run manifest (TOML or YAML); defaults to the reference scenario
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stellar profile CSV (overrides the manifest)
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Named compact-object mass
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,

    /// Compact-object mass in kg (wins over --preset)
    #[arg(long)]
    mass_kg: Option<f64>,

    /// Capture disc radius in Schwarzschild radii
    #[arg(long)]
    disc_multiplier: Option<f64>,

    /// Integration step in seconds
    #[arg(long)]
    time_step: Option<f64>,

    /// Stop after this many steps (runs until Ctrl-C otherwise)
    #[arg(long)]
    ticks: Option<u64>,

    /// Do not pace the run to wall-clock time
    #[arg(long, default_value_t = false)]
    headless: bool,

    /// Write a JSON telemetry sidecar here
    #[arg(long)]
    telemetry: Option<PathBuf>,

    /// Render the trajectory to this PNG
    #[arg(long)]
    trajectory_plot: Option<PathBuf>,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 800)]
    height: u32,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum PresetArg {
    Earth,
    Jupiter,
    HeaviestPlanet,
    HeaviestBrownDwarf,
}

impl From<PresetArg> for MassPreset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::Earth => MassPreset::Earth,
            PresetArg::Jupiter => MassPreset::Jupiter,
            PresetArg::HeaviestPlanet => MassPreset::HeaviestPlanet,
            PresetArg::HeaviestBrownDwarf => MassPreset::HeaviestBrownDwarf,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut run = match &cli.config {
        Some(path) => load_run_config(path)
            .with_context(|| format!("loading run manifest {}", path.display()))?,
        None => RunConfig::default(),
    };
    apply_overrides(&mut run, &cli);

    let (profile, sim_config) = scenario::prepare(&run)?;
    let mut integrator = Integrator::new(&profile, sim_config)?;

    let interval = run.render.interval_ticks;
    // samples are only kept when something will consume them
    let mut recorder = (cli.telemetry.is_some() || cli.trajectory_plot.is_some())
        .then(|| TrajectoryRecorder::new(interval));
    let outcome = {
        let mut observers = ObserverSet::new()
            .with(StopSignal::ctrlc(interval)?)
            .with(Hud::new(interval));
        if let Some(recorder) = recorder.as_mut() {
            observers = observers.with(recorder);
        }
        if !cli.headless {
            observers = observers.with(Pacer::new(
                interval,
                Duration::from_secs_f64(run.render.frame_seconds),
            ));
        }
        integrator.run(&mut observers, cli.ticks)
    };

    let state = &outcome.final_state;
    println!("=== Simulation Summary ===");
    println!("Steps           : {}", outcome.ticks);
    println!(
        "Simulated time  : {:.1} s ({:.6} years)",
        state.elapsed_time_s,
        seconds_to_years(state.elapsed_time_s)
    );
    println!("Final radius    : {:.5} R_sun", state.radius_fraction());
    println!("Final speed     : {:.3e} m/s", state.speed_m_s());
    println!("Final mass      : {:.6e} kg", state.compact_object_mass_kg);
    println!(
        "Accreted mass   : {:.3e} kg",
        state.cumulative_accreted_mass_kg
    );

    let samples = recorder
        .as_ref()
        .map_or(&[][..], TrajectoryRecorder::samples);
    println!("Samples kept    : {}", samples.len());

    if let Some(path) = &cli.telemetry {
        telemetry::write_sidecar(path, &sim_config, &outcome, samples)
            .with_context(|| format!("writing telemetry to {}", path.display()))?;
        println!("Telemetry       : {}", path.display());
    }

    if let Some(path) = &cli.trajectory_plot {
        plot_trajectory(
            path,
            samples,
            profile.max_radius_fraction(),
            (cli.width, cli.height),
        )?;
        println!("Trajectory plot : {}", path.display());
    }

    Ok(())
}

fn apply_overrides(run: &mut RunConfig, cli: &Cli) {
    if let Some(profile) = &cli.profile {
        run.profile = profile.clone();
    }
    if let Some(preset) = cli.preset {
        run.compact_object.preset = Some(preset.into());
        run.compact_object.mass_kg = None;
    }
    if let Some(mass) = cli.mass_kg {
        run.compact_object.mass_kg = Some(mass);
    }
    if let Some(k) = cli.disc_multiplier {
        run.compact_object.disc_multiplier = k;
    }
    if let Some(dt) = cli.time_step {
        run.time_step_s = dt;
    }
}
