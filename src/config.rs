//! Dashboard settings, read from an optional JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Inclusive year window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearSpan {
    pub from: f64,
    pub to: f64,
}

/// Bounds and default for the top-N slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopN {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

impl TopN {
    pub fn clamp(&self, n: usize) -> usize {
        n.max(self.min).min(self.max)
    }
}

/// Where the dashboards read their data from and how they slice it.
///
/// Every field has a default; a settings file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Base directory for relative source paths.
    pub data_dir: PathBuf,
    pub health_source: PathBuf,
    pub drinking_source: PathBuf,
    pub casualties_source: PathBuf,
    pub drinking_years: YearSpan,
    pub top_n: TopN,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            health_source: PathBuf::from("health_indicators_isr_cleaned.csv"),
            drinking_source: PathBuf::from("alcohol_heavy_drinking_israel.csv"),
            casualties_source: PathBuf::from("total_casualties_by_municipality.xlsx"),
            drinking_years: YearSpan {
                from: 2015.0,
                to: 2025.0,
            },
            top_n: TopN {
                min: 5,
                max: 20,
                default: 10,
            },
        }
    }
}

impl Settings {
    /// Read and validate a JSON settings file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        log::debug!("Read settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| Err(ConfigError::Invalid { message });

        if self.drinking_years.from > self.drinking_years.to {
            return invalid(format!(
                "drinking_years.from ({}) is after drinking_years.to ({})",
                self.drinking_years.from, self.drinking_years.to
            ));
        }
        let TopN { min, max, default } = self.top_n;
        if min == 0 || min > max {
            return invalid(format!("top_n range {min}..={max} is empty or starts at 0"));
        }
        if !(min..=max).contains(&default) {
            return invalid(format!("top_n.default {default} is outside {min}..={max}"));
        }
        Ok(())
    }

    /// Resolve a source path against `data_dir` unless it is absolute.
    pub fn resolve(&self, source: &Path) -> PathBuf {
        if source.is_absolute() {
            source.to_path_buf()
        } else {
            self.data_dir.join(source)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "data_dir": "/srv/data", "top_n": {{ "min": 3, "max": 8, "default": 5 }} }}"#
        )
        .unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/srv/data"));
        assert_eq!(settings.top_n.max, 8);
        assert_eq!(settings.drinking_years, Settings::default().drinking_years);
        assert_eq!(
            settings.resolve(&settings.health_source),
            PathBuf::from("/srv/data/health_indicators_isr_cleaned.csv")
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "langauge": "he" }}"#).unwrap();
        assert!(matches!(
            Settings::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn inverted_ranges_are_invalid() {
        let mut settings = Settings::default();
        settings.drinking_years = YearSpan { from: 2025.0, to: 2015.0 };
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid { .. })));

        let mut settings = Settings::default();
        settings.top_n.default = 50;
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn clamp_top_n() {
        let top = Settings::default().top_n;
        assert_eq!(top.clamp(1), 5);
        assert_eq!(top.clamp(12), 12);
        assert_eq!(top.clamp(99), 20);
    }

    #[test]
    fn clamp_with_inverted_bounds_does_not_panic() {
        let top = TopN {
            min: 10,
            max: 5,
            default: 7,
        };
        assert_eq!(top.clamp(3), 5);
        assert_eq!(top.clamp(12), 5);
    }
}
