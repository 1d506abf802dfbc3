//! The dashboards: which file each one reads, how it prepares the data, and
//! what a user selection turns into.
//!
//! Each dashboard works in two steps. `prepare` runs on the raw cached
//! dataset (type coercion, fixed windows). A view function then applies the
//! user's selection and returns a [`Panel`]: the query result plus a
//! [`ChartSpec`] describing how to draw it.

pub mod casualties;
pub mod chart;
pub mod drinking;
pub mod health;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub use chart::{Bar, ChartKind, ChartSpec, Series};

use crate::config::Settings;
use crate::data::model::{Column, Dataset};
use crate::error::ColumnError;

/// A query result ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub chart: ChartSpec,
    pub table: Dataset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardKind {
    HealthIndicators,
    BingeDrinking,
    MunicipalityCasualties,
}

impl DashboardKind {
    pub const ALL: [DashboardKind; 3] = [
        DashboardKind::HealthIndicators,
        DashboardKind::BingeDrinking,
        DashboardKind::MunicipalityCasualties,
    ];

    pub fn title(self) -> &'static str {
        match self {
            DashboardKind::HealthIndicators => "Israel Health Dashboard",
            DashboardKind::BingeDrinking => "Heavy Episodic Drinking in Israel (Ages 15+)",
            DashboardKind::MunicipalityCasualties => "Municipality Casualties Dashboard",
        }
    }

    /// Short name used on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            DashboardKind::HealthIndicators => "health",
            DashboardKind::BingeDrinking => "drinking",
            DashboardKind::MunicipalityCasualties => "casualties",
        }
    }

    /// The configured source file, resolved against the data directory.
    pub fn source(self, settings: &Settings) -> PathBuf {
        let source = match self {
            DashboardKind::HealthIndicators => &settings.health_source,
            DashboardKind::BingeDrinking => &settings.drinking_source,
            DashboardKind::MunicipalityCasualties => &settings.casualties_source,
        };
        settings.resolve(source)
    }

    pub fn required_columns(self) -> &'static [Column] {
        match self {
            DashboardKind::HealthIndicators => health::REQUIRED,
            DashboardKind::BingeDrinking => drinking::REQUIRED,
            DashboardKind::MunicipalityCasualties => casualties::REQUIRED,
        }
    }

    /// Check the required columns, then run the dashboard's preparation step.
    pub fn prepare(self, raw: &Dataset, settings: &Settings) -> Result<Dataset, ColumnError> {
        raw.require_all(self.required_columns())?;
        Ok(match self {
            DashboardKind::HealthIndicators => health::prepare(raw),
            DashboardKind::BingeDrinking => drinking::prepare(raw, settings)?,
            DashboardKind::MunicipalityCasualties => casualties::prepare(raw),
        })
    }
}

impl fmt::Display for DashboardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dashboard '{0}' (expected health, drinking or casualties)")]
pub struct UnknownDashboard(pub String);

impl FromStr for DashboardKind {
    type Err = UnknownDashboard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DashboardKind::ALL
            .into_iter()
            .find(|k| k.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownDashboard(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    #[test]
    fn slugs_round_trip() {
        for kind in DashboardKind::ALL {
            assert_eq!(kind.slug().parse::<DashboardKind>(), Ok(kind));
        }
        assert_eq!(
            "map".parse::<DashboardKind>(),
            Err(UnknownDashboard("map".into()))
        );
    }

    #[test]
    fn sources_resolve_against_data_dir() {
        let settings = Settings {
            data_dir: PathBuf::from("/data"),
            ..Settings::default()
        };
        assert_eq!(
            DashboardKind::MunicipalityCasualties.source(&settings),
            PathBuf::from("/data/total_casualties_by_municipality.xlsx")
        );
    }

    #[test]
    fn prepare_rejects_missing_required_columns() {
        let raw = Dataset::from_records(
            vec![Column::Year, Column::Value],
            vec![Record::new().with(Column::Year, 2020.0)],
        );
        let err = DashboardKind::BingeDrinking
            .prepare(&raw, &Settings::default())
            .unwrap_err();
        assert_eq!(err, ColumnError::Absent { column: Column::Sex });
    }
}
