//! The `view` and `offset` commands.

use crate::preview::render_svg;
use anyhow::{Context, Result};
use profilekit_dxf::{DxfSource, DxfWriter};
use profilekit_profiles::{OffsetReport, Pipeline};
use profilekit_settings::{OffsetSettings, SettingsOverrides};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Loads settings from `config` (or defaults), then applies command-line
/// overrides and validates the result.
pub fn resolve_settings(
    config: Option<&Path>,
    overrides: &SettingsOverrides,
) -> Result<OffsetSettings> {
    let mut settings = match config {
        Some(path) => OffsetSettings::load_from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => OffsetSettings::default(),
    };
    settings.apply(overrides);
    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

/// Reads `input` and runs the full offset pipeline over it.
pub fn process(input: &Path, settings: &OffsetSettings) -> Result<OffsetReport> {
    let source = DxfSource::open(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let pipeline = Pipeline::new(settings.pipeline_options());
    let report = pipeline
        .run_entities(source.entities(settings.plane))
        .with_context(|| format!("Failed to process {}", input.display()))?;
    Ok(report)
}

/// Writes a one-line-per-profile summary table.
pub fn write_report<W: Write>(out: &mut W, report: &OffsetReport) -> std::io::Result<()> {
    writeln!(
        out,
        "{:>5}  {:<5}  {:>5}  {:>14}  {:>8}  {:>6}",
        "index", "kind", "depth", "area", "vertices", "source"
    )?;
    for (index, region) in report.classification.iter() {
        let profile = &report.profiles[index];
        let source = profile
            .source()
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        writeln!(
            out,
            "{:>5}  {:<5}  {:>5}  {:>14.4}  {:>8}  {:>6}",
            index,
            region,
            report.forest.depth(index),
            profile.area(),
            profile.vertex_count(),
            source
        )?;
    }
    writeln!(
        out,
        "{} profiles, {} offset rings, {} eroded, {} skipped entities",
        report.profiles.len(),
        report.rings.len(),
        report.eroded.len(),
        report.skipped.len()
    )
}

/// `profilekit view`: prints the profile table and optionally an SVG preview.
pub fn view<W: Write>(
    input: &Path,
    settings: &OffsetSettings,
    svg: Option<&Path>,
    out: &mut W,
) -> Result<OffsetReport> {
    let report = process(input, settings)?;
    write_report(out, &report).context("Failed to write report")?;

    if let Some(svg_path) = svg {
        std::fs::write(svg_path, render_svg(&report))
            .with_context(|| format!("Failed to write SVG preview: {}", svg_path.display()))?;
        info!(path = %svg_path.display(), "Wrote SVG preview");
    }

    Ok(report)
}

/// `profilekit offset`: writes every non-empty offset ring to `output`.
pub fn offset(input: &Path, output: &Path, settings: &OffsetSettings) -> Result<OffsetReport> {
    let report = process(input, settings)?;

    let writer = DxfWriter::new(settings.output_layer.as_str());
    let written = writer
        .write(report.rings.iter().map(|r| r.vertices.as_slice()), output)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        distance = settings.distance,
        rings = written,
        "Offset complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use profilekit_core::{Plane, Point2};
    use tempfile::tempdir;

    fn write_square(path: &Path, half: f64) {
        let ring = [
            Point2::new(-half, -half),
            Point2::new(half, -half),
            Point2::new(half, half),
            Point2::new(-half, half),
        ];
        DxfWriter::new("0").write([&ring[..]], path).unwrap();
    }

    #[test]
    fn test_offset_writes_grown_square() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("square.dxf");
        let output = dir.path().join("out.dxf");
        write_square(&input, 5.0);

        let report = offset(&input, &output, &OffsetSettings::default()).unwrap();
        assert_eq!(report.rings.len(), 1);

        let back: Vec<_> = DxfSource::open(&output)
            .unwrap()
            .entities(Plane::Xy)
            .collect();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].layer(), Some("OFFSET"));
    }

    #[test]
    fn test_view_report_and_svg() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("square.dxf");
        let svg = dir.path().join("preview.svg");
        write_square(&input, 2.0);

        let mut out = Vec::new();
        view(&input, &OffsetSettings::default(), Some(&svg), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("SOLID"));
        assert!(text.contains("1 profiles, 1 offset rings"));
        assert!(std::fs::read_to_string(&svg).unwrap().contains("<svg"));
    }

    #[test]
    fn test_missing_input_has_context() {
        let err = process(Path::new("/nonexistent/in.dxf"), &OffsetSettings::default())
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read input file"));
    }

    #[test]
    fn test_overrides_are_validated() {
        let overrides = SettingsOverrides {
            distance: Some(-2.0),
            ..SettingsOverrides::default()
        };
        assert!(resolve_settings(None, &overrides).is_err());
    }
}
