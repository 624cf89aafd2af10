use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use stellar_accretion::config::MassPreset;
use stellar_accretion::export::{self, sweep as export_sweep};
use stellar_accretion::presentation::plot_sweep;
use stellar_accretion::profile::StellarProfile;
use stellar_accretion::sweep;

/// Find the orbital radius where a compact object eats the most stellar material.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Sweep the accretion rate per unit area over every shell of a stellar profile"
)]
struct Cli {
    /// Stellar profile CSV
    #[arg(long, default_value = "data/sun_stats.csv")]
    profile: PathBuf,

    /// Write the per-shell rates as CSV (use '-' for stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Render the rate curve to this PNG
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Named compact-object mass used for the absolute rate
    #[arg(long, value_enum, default_value_t = PresetArg::HeaviestPlanet)]
    preset: PresetArg,

    /// Compact-object mass in kg (wins over --preset)
    #[arg(long)]
    mass_kg: Option<f64>,

    /// Capture disc radius in Schwarzschild radii
    #[arg(long, default_value_t = 2.0)]
    disc_multiplier: f64,

    #[arg(long, default_value_t = 1000)]
    width: u32,

    #[arg(long, default_value_t = 700)]
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

    let mass_kg = cli
        .mass_kg
        .unwrap_or_else(|| MassPreset::from(cli.preset).mass_kg());
    if !(mass_kg.is_finite() && mass_kg > 0.0) {
        anyhow::bail!("compact-object mass must be positive (got {mass_kg})");
    }
    if !(cli.disc_multiplier.is_finite() && cli.disc_multiplier > 0.0) {
        anyhow::bail!(
            "disc multiplier must be positive (got {})",
            cli.disc_multiplier
        );
    }

    let profile = StellarProfile::from_csv_path(&cli.profile)?;
    let result = sweep::sweep(&profile);
    log::debug!("swept {} shells", result.len());

    if let Some(path) = &cli.output {
        let writer = export::writer_for_path(path)?;
        export_sweep::write_csv(writer, &result)?;
    }

    let peak = result
        .peak_consumption(mass_kg, cli.disc_multiplier)
        .ok_or_else(|| anyhow::anyhow!("profile produced no finite consumption rate"))?;

    let report = [
        format!("max r_frac: {:.8}", peak.radius_fraction),
        format!("max consumption: {:.2e} kg/s/m^2", peak.consumption_kg_s_m2),
        format!("Schwarzschild radius: {:.2e} m", peak.schwarzschild_radius_m),
        format!("eating disc surface: {:.2e} m^2", peak.capture_area_m2),
        format!("eaten mass per second: {:.2e} kg/s", peak.eaten_mass_kg_s),
    ];
    // keep stdout clean for CSV piping
    let to_stdout = cli.output.as_deref() != Some(std::path::Path::new("-"));
    for line in &report {
        if to_stdout {
            println!("{line}");
        } else {
            eprintln!("{line}");
        }
    }

    if let Some(path) = &cli.plot {
        plot_sweep(path, &result, (cli.width, cli.height))?;
        log::info!("sweep plot written to {}", path.display());
    }

    Ok(())
}
