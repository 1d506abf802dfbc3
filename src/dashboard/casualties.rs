//! Top-N municipalities by a casualty metric.

use std::fmt;

use super::{ChartSpec, Panel};
use crate::config::TopN;
use crate::data::model::{Column, Dataset};
use crate::data::sort::SortOrder;
use crate::error::ColumnError;

pub const REQUIRED: &[Column] = &[
    Column::Municipality,
    Column::TotalCasualties,
    Column::TotalDeaths,
    Column::CurrentlyHospitalized,
];

/// The numeric columns a user can rank municipalities by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    #[default]
    TotalCasualties,
    TotalDeaths,
    CurrentlyHospitalized,
}

impl Metric {
    pub const ALL: [Metric; 3] = [
        Metric::TotalCasualties,
        Metric::TotalDeaths,
        Metric::CurrentlyHospitalized,
    ];

    pub fn column(self) -> Column {
        match self {
            Metric::TotalCasualties => Column::TotalCasualties,
            Metric::TotalDeaths => Column::TotalDeaths,
            Metric::CurrentlyHospitalized => Column::CurrentlyHospitalized,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column().header())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CasualtySelection {
    pub metric: Metric,
    pub top_n: usize,
}

impl CasualtySelection {
    pub fn new(top_n: &TopN) -> Self {
        Self {
            metric: Metric::default(),
            top_n: top_n.default,
        }
    }
}

pub fn prepare(raw: &Dataset) -> Dataset {
    let metrics: Vec<Column> = Metric::ALL.iter().map(|m| m.column()).collect();
    raw.coerce_numeric(&metrics)
}

/// The `top_n` municipalities (clamped to the configured range) with the
/// highest value of the selected metric.
pub fn view(
    data: &Dataset,
    selection: &CasualtySelection,
    bounds: &TopN,
) -> Result<Panel, ColumnError> {
    let n = bounds.clamp(selection.top_n);
    let metric = selection.metric;
    let table = data.sort_and_top(metric.column(), SortOrder::Descending, n)?;
    let chart = ChartSpec::bar(
        format!("{metric} - Top {n}"),
        Column::Municipality,
        metric.column(),
    );
    Ok(Panel { chart, table })
}
