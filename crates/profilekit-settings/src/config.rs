//! Offset run configuration.
//!
//! Settings can be loaded from a `.json` or `.toml` file. Any key left out of
//! the file keeps its default, and command-line flags are layered on top with
//! [`OffsetSettings::apply`].

use crate::error::{Result, SettingsError};
use profilekit_core::{ArcSampling, ContainmentPolicy, JoinStyle, Plane, EPSILON};
use profilekit_profiles::PipelineOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Every tunable of an offset run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffsetSettings {
    /// Offset magnitude in drawing units.
    pub distance: f64,
    /// Axes read as the 2D working plane.
    pub plane: Plane,
    pub arc_sampling: ArcSampling,
    pub join: JoinStyle,
    /// Longest miter allowed, as a multiple of `distance`.
    pub miter_limit: f64,
    pub containment: ContainmentPolicy,
    /// Endpoint snapping distance when chaining loose lines.
    pub chain_tolerance: f64,
    /// Layer the offset polylines are written on.
    pub output_layer: String,
}

impl Default for OffsetSettings {
    fn default() -> Self {
        Self {
            distance: 1.0,
            plane: Plane::Xy,
            arc_sampling: ArcSampling::default(),
            join: JoinStyle::Miter,
            miter_limit: 4.0,
            containment: ContainmentPolicy::SmallestAreaWins,
            chain_tolerance: 1e-6,
            output_layer: "OFFSET".to_string(),
        }
    }
}

/// Values supplied on the command line. `None` leaves the setting alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverrides {
    pub distance: Option<f64>,
    pub plane: Option<Plane>,
    pub join: Option<JoinStyle>,
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            _ => Err(SettingsError::UnsupportedFormat(
                "Config file must be .json or .toml".to_string(),
            )),
        }
    }
}

impl OffsetSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let settings: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        settings.validate()?;
        debug!(path = %path.display(), ?settings, "Loaded settings");
        Ok(settings)
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Layers command-line values over these settings.
    pub fn apply(&mut self, overrides: &SettingsOverrides) {
        if let Some(distance) = overrides.distance {
            self.distance = distance;
        }
        if let Some(plane) = overrides.plane {
            self.plane = plane;
        }
        if let Some(join) = overrides.join {
            self.join = join;
        }
        if overrides.strict {
            self.containment = ContainmentPolicy::Strict;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(SettingsError::invalid(
                "distance",
                format!("must be finite and >= 0, got {}", self.distance),
            ));
        }

        if self.miter_limit.is_nan() || self.miter_limit < 1.0 {
            return Err(SettingsError::invalid(
                "miter_limit",
                format!("must be >= 1, got {}", self.miter_limit),
            ));
        }

        if self.chain_tolerance.is_nan() || self.chain_tolerance <= 0.0 {
            return Err(SettingsError::invalid("chain_tolerance", "must be > 0"));
        }

        match self.arc_sampling {
            ArcSampling::Fixed { steps } if steps < 2 => {
                return Err(SettingsError::invalid(
                    "arc_sampling.steps",
                    "must be at least 2",
                ));
            }
            ArcSampling::ChordTolerance {
                tolerance,
                min_segments,
                max_segments,
            } => {
                if tolerance.is_nan() || tolerance <= 0.0 {
                    return Err(SettingsError::invalid(
                        "arc_sampling.tolerance",
                        "must be > 0",
                    ));
                }
                if min_segments == 0 || max_segments < min_segments {
                    return Err(SettingsError::invalid(
                        "arc_sampling.max_segments",
                        "segment bounds must satisfy 1 <= min_segments <= max_segments",
                    ));
                }
            }
            ArcSampling::Fixed { .. } => {}
        }

        if self.output_layer.trim().is_empty() {
            return Err(SettingsError::invalid("output_layer", "must not be empty"));
        }

        Ok(())
    }

    /// Options for a [`profilekit_profiles::Pipeline`] run.
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            distance: self.distance,
            sampling: self.arc_sampling,
            join: self.join,
            miter_limit: self.miter_limit,
            containment: self.containment,
            chain_tolerance: self.chain_tolerance,
            tolerance: EPSILON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let settings = OffsetSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.pipeline_options(), PipelineOptions::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("offset.toml");
        std::fs::write(
            &path,
            "distance = 2.5\njoin = \"round\"\n\n[arc_sampling]\nmode = \"fixed\"\nsteps = 64\n",
        )
        .unwrap();

        let settings = OffsetSettings::load_from_file(&path).unwrap();
        assert_eq!(settings.distance, 2.5);
        assert_eq!(settings.join, JoinStyle::Round);
        assert_eq!(settings.arc_sampling, ArcSampling::reference());
        assert_eq!(settings.plane, Plane::Xy);
        assert_eq!(settings.output_layer, "OFFSET");
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("offset.json");
        let settings = OffsetSettings {
            plane: Plane::Zx,
            containment: ContainmentPolicy::Strict,
            ..OffsetSettings::default()
        };
        settings.save_to_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"plane\": \"zx\""));
        assert!(text.contains("\"containment\": \"strict\""));
        assert_eq!(OffsetSettings::load_from_file(&path).unwrap(), settings);
    }

    #[test]
    fn test_save_and_load_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("offset.toml");
        let settings = OffsetSettings {
            distance: 0.25,
            output_layer: "CUT".to_string(),
            ..OffsetSettings::default()
        };
        settings.save_to_file(&path).unwrap();
        assert_eq!(OffsetSettings::load_from_file(&path).unwrap(), settings);
    }

    #[test]
    fn test_unknown_extension() {
        let err = OffsetSettings::load_from_file(Path::new("offset.yaml")).unwrap_err();
        assert!(matches!(err, SettingsError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_validation_failures() {
        let bad = [
            OffsetSettings {
                distance: -1.0,
                ..OffsetSettings::default()
            },
            OffsetSettings {
                distance: f64::NAN,
                ..OffsetSettings::default()
            },
            OffsetSettings {
                miter_limit: 0.5,
                ..OffsetSettings::default()
            },
            OffsetSettings {
                chain_tolerance: 0.0,
                ..OffsetSettings::default()
            },
            OffsetSettings {
                arc_sampling: ArcSampling::ChordTolerance {
                    tolerance: 0.0,
                    min_segments: 4,
                    max_segments: 8,
                },
                ..OffsetSettings::default()
            },
            OffsetSettings {
                arc_sampling: ArcSampling::Fixed { steps: 1 },
                ..OffsetSettings::default()
            },
            OffsetSettings {
                output_layer: " ".to_string(),
                ..OffsetSettings::default()
            },
        ];
        for settings in bad {
            assert!(
                matches!(settings.validate(), Err(SettingsError::InvalidSetting { .. })),
                "{:?} should be rejected",
                settings
            );
        }
    }

    #[test]
    fn test_invalid_file_is_rejected_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("offset.json");
        std::fs::write(&path, r#"{ "miter_limit": 0.1 }"#).unwrap();
        assert!(matches!(
            OffsetSettings::load_from_file(&path),
            Err(SettingsError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_overrides_win() {
        let mut settings = OffsetSettings::default();
        settings.apply(&SettingsOverrides {
            distance: Some(3.0),
            plane: Some(Plane::Yz),
            join: None,
            strict: true,
        });
        assert_eq!(settings.distance, 3.0);
        assert_eq!(settings.plane, Plane::Yz);
        assert_eq!(settings.join, JoinStyle::Miter);
        assert_eq!(settings.containment, ContainmentPolicy::Strict);
    }
}
