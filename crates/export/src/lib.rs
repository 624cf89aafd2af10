//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod sweep {
    use std::io::Write;

    use accretion_sweep::SweepResult;

    /// Header written ahead of the sweep rows.
    pub const HEADER: [&str; 2] = ["radius_fraction", "consumption_kg_s_m2"];

    /// Write one row per tabulated shell.
    pub fn write_csv<W: Write>(writer: W, result: &SweepResult) -> csv::Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        wtr.write_record(HEADER)?;
        for point in &result.points {
            wtr.write_record([
                point.radius_fraction.to_string(),
                format!("{:.6e}", point.consumption_kg_s_m2),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

pub mod telemetry {
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    use accretion_integrator::{RunOutcome, SimulationConfig, TickSnapshot};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    /// Trajectory sample stored in the telemetry sidecar.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct Sample {
        pub iteration: u64,
        pub time_s: f64,
        pub position: [f64; 2],
        pub radius_fraction: f64,
        pub speed_m_s: f64,
        pub mass_kg: f64,
        pub accreted_total_kg: f64,
    }

    impl From<&TickSnapshot> for Sample {
        fn from(snapshot: &TickSnapshot) -> Self {
            Self {
                iteration: snapshot.iteration,
                time_s: snapshot.state.elapsed_time_s,
                position: snapshot.state.position,
                radius_fraction: snapshot.state.radius_fraction(),
                speed_m_s: snapshot.state.speed_m_s(),
                mass_kg: snapshot.state.compact_object_mass_kg,
                accreted_total_kg: snapshot.state.cumulative_accreted_mass_kg,
            }
        }
    }

    #[derive(Serialize)]
    struct TelemetrySidecar<'a> {
        config: &'a SimulationConfig,
        outcome: &'a RunOutcome,
        samples: &'a [Sample],
    }

    /// Write the run summary and sampled trajectory as pretty-printed JSON.
    pub fn write_sidecar(
        output: &Path,
        config: &SimulationConfig,
        outcome: &RunOutcome,
        samples: &[Sample],
    ) -> io::Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let sidecar = TelemetrySidecar {
            config,
            outcome,
            samples,
        };
        to_writer_pretty(File::create(output)?, &sidecar)?;
        Ok(())
    }
}
