//! Heavy episodic drinking by sex, one line per sex.

use super::{ChartSpec, DashboardKind, Panel};
use crate::config::Settings;
use crate::data::model::{Column, Dataset};
use crate::data::sort::SortOrder;
use crate::error::ColumnError;

pub const REQUIRED: &[Column] = &[Column::Year, Column::Value, Column::Sex];

/// Coerce year and value, then keep the configured year window.
pub fn prepare(raw: &Dataset, settings: &Settings) -> Result<Dataset, ColumnError> {
    let span = settings.drinking_years;
    raw.coerce_numeric(&[Column::Year, Column::Value])
        .filter_range(Column::Year, span.from, span.to)
}

pub fn view(data: &Dataset) -> Result<Panel, ColumnError> {
    let table = data.sort_by_column(Column::Year, SortOrder::Ascending)?;
    let chart = ChartSpec::line(DashboardKind::BingeDrinking.title(), Column::Year, Column::Value)
        .split_by(Column::Sex)
        .with_markers();
    Ok(Panel { chart, table })
}
