use std::f64::consts::TAU;
use std::fs;
use std::path::Path;

use accretion_export::telemetry::Sample;
use accretion_sweep::SweepResult;
use plotters::prelude::*;
use thiserror::Error;

/// Half-width of the trajectory view when the object stays close to the star (R_sun).
const MIN_VIEW_EXTENT: f64 = 2.0;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("failed to prepare plot output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to draw plot: {0}")]
    Drawing(String),
    #[error("nothing to plot")]
    Empty,
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for PlotError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Drawing(err.to_string())
    }
}

/// Draw the star as a disc of `star_radius` with the recorded path on top.
pub fn plot_trajectory(
    output: &Path,
    samples: &[Sample],
    star_radius: f64,
    size: (u32, u32),
) -> Result<(), PlotError> {
    let last = samples.last().ok_or(PlotError::Empty)?;
    ensure_parent(output)?;

    let extent = samples
        .iter()
        .map(|s| s.position[0].abs().max(s.position[1].abs()) * 1.05)
        .fold(MIN_VIEW_EXTENT.max(star_radius * 1.05), f64::max);

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 22.0, FontStyle::Bold).color(&WHITE);
    let label_font = FontDesc::new(font_family, 14.0, FontStyle::Normal).color(&WHITE);

    let root = BitMapBackend::new(output, size).into_drawing_area();
    root.fill(&BLACK)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Compact object trajectory", caption_font)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("x (R_sun)")
        .y_desc("y (R_sun)")
        .axis_style(&WHITE)
        .label_style(label_font.clone())
        .axis_desc_style(label_font)
        .draw()?;

    let outline: Vec<(f64, f64)> = (0..=128)
        .map(|i| {
            let angle = TAU * i as f64 / 128.0;
            (star_radius * angle.cos(), star_radius * angle.sin())
        })
        .collect();
    chart.draw_series(std::iter::once(Polygon::new(outline, YELLOW.filled())))?;

    chart.draw_series(std::iter::once(PathElement::new(
        samples
            .iter()
            .map(|s| (s.position[0], s.position[1]))
            .collect::<Vec<_>>(),
        ShapeStyle::from(&RED).stroke_width(2),
    )))?;
    chart.draw_series(std::iter::once(Circle::new(
        (last.position[0], last.position[1]),
        5,
        RED.filled(),
    )))?;

    root.present()?;
    Ok(())
}

/// Consumption rate against radius with the peak shell marked.
pub fn plot_sweep(output: &Path, result: &SweepResult, size: (u32, u32)) -> Result<(), PlotError> {
    let peak = *result.peak().ok_or(PlotError::Empty)?;
    ensure_parent(output)?;

    let x_max = result
        .points
        .iter()
        .map(|p| p.radius_fraction)
        .fold(0.0, f64::max);
    let mut y_max = peak.consumption_kg_s_m2 * 1.05;
    if !(y_max.is_finite() && y_max > 0.0) {
        y_max = 1.0;
    }

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);

    let root = BitMapBackend::new(output, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Mass consumption per unit area", caption_font)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("r / R_sun")
        .y_desc("kg per s per m^2")
        .label_style(label_font.clone())
        .y_label_formatter(&|v| format!("{v:.1e}"))
        .draw()?;

    chart.draw_series(std::iter::once(PathElement::new(
        result
            .points
            .iter()
            .map(|p| (p.radius_fraction, p.consumption_kg_s_m2))
            .collect::<Vec<_>>(),
        ShapeStyle::from(&BLUE).stroke_width(2),
    )))?;

    chart.draw_series(std::iter::once(PathElement::new(
        vec![(peak.radius_fraction, 0.0), (peak.radius_fraction, y_max)],
        ShapeStyle::from(&RED).stroke_width(1),
    )))?;
    chart.draw_series(std::iter::once(Text::new(
        format!("r = {:.5}", peak.radius_fraction),
        (peak.radius_fraction + 0.01 * x_max, y_max * 0.95),
        label_font.color(&RED),
    )))?;

    root.present()?;
    Ok(())
}

fn ensure_parent(output: &Path) -> std::io::Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}
