//! Health indicators over time, optionally split by sex.

use super::{ChartSpec, Panel};
use crate::data::filter::ALL;
use crate::data::model::{Column, Dataset};
use crate::data::sort::SortOrder;
use crate::error::ColumnError;

pub const REQUIRED: &[Column] = &[Column::IndicatorName, Column::Year, Column::Value];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthSelection {
    /// `None` picks the first indicator in the data.
    pub indicator: Option<String>,
    pub sex: String,
}

impl Default for HealthSelection {
    fn default() -> Self {
        Self {
            indicator: None,
            sex: ALL.to_string(),
        }
    }
}

pub fn prepare(raw: &Dataset) -> Dataset {
    raw.coerce_numeric(&[Column::Year, Column::Value])
}

/// Indicator names in first-appearance order.
pub fn indicators(data: &Dataset) -> Result<Vec<String>, ColumnError> {
    Ok(data
        .distinct(Column::IndicatorName)?
        .iter()
        .map(ToString::to_string)
        .collect())
}

/// Sex filter choices for one indicator: [`ALL`] followed by the values
/// present. Empty when the indicator has no sex breakdown, in which case no
/// sex filter applies.
pub fn sex_choices(data: &Dataset, indicator: &str) -> Result<Vec<String>, ColumnError> {
    if !data.has_column(Column::Sex) {
        return Ok(Vec::new());
    }
    let values = data
        .filter_equals(Column::IndicatorName, indicator)?
        .distinct(Column::Sex)?;
    if values.is_empty() {
        return Ok(Vec::new());
    }
    Ok(std::iter::once(ALL.to_string())
        .chain(values.iter().map(ToString::to_string))
        .collect())
}

/// The selected indicator's rows, sorted by year.
pub fn view(data: &Dataset, selection: &HealthSelection) -> Result<Panel, ColumnError> {
    let indicator = match &selection.indicator {
        Some(name) => name.clone(),
        None => match indicators(data)?.into_iter().next() {
            Some(first) => first,
            None => {
                return Ok(Panel {
                    chart: chart(""),
                    table: data.head(0),
                })
            }
        },
    };

    let mut table = data.filter_equals(Column::IndicatorName, &indicator)?;
    if !sex_choices(data, &indicator)?.is_empty() {
        table = table.filter_equals(Column::Sex, &selection.sex)?;
    }
    let table = table.sort_by_column(Column::Year, SortOrder::Ascending)?;

    Ok(Panel {
        chart: chart(&indicator),
        table,
    })
}

fn chart(indicator: &str) -> ChartSpec {
    ChartSpec::line(format!("{indicator} Over Time"), Column::Year, Column::Value).with_markers()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::Record;

    fn raw() -> Dataset {
        let rows = [
            ("Life expectancy", "2020", "82.7", Some("Male")),
            ("Life expectancy", "2019", "82.6", Some("Male")),
            ("Life expectancy", "2019", "84.9", Some("Female")),
            ("Infant mortality", "2019", "3.0", None),
            ("Infant mortality", "2018", "x", None),
        ];
        let records = rows
            .iter()
            .map(|&(name, year, value, sex)| {
                Record::new()
                    .with(Column::IndicatorName, name)
                    .with(Column::Year, year)
                    .with(Column::Value, value)
                    .with(Column::Sex, sex)
            })
            .collect();
        Dataset::from_records(
            vec![Column::IndicatorName, Column::Year, Column::Value, Column::Sex],
            records,
        )
    }

    #[test]
    fn indicators_in_source_order() {
        assert_eq!(
            indicators(&prepare(&raw())).unwrap(),
            vec!["Life expectancy", "Infant mortality"]
        );
    }

    #[test]
    fn sex_choices_only_when_present() {
        let data = prepare(&raw());
        assert_eq!(
            sex_choices(&data, "Life expectancy").unwrap(),
            vec!["All", "Male", "Female"]
        );
        assert!(sex_choices(&data, "Infant mortality").unwrap().is_empty());
    }

    #[test]
    fn default_selection_shows_first_indicator_sorted_by_year() {
        let panel = view(&prepare(&raw()), &HealthSelection::default()).unwrap();
        assert_eq!(panel.chart.title, "Life expectancy Over Time");
        let years: Vec<f64> = panel.table.iter().filter_map(|r| r.number(Column::Year)).collect();
        assert_eq!(years, vec![2019.0, 2019.0, 2020.0]);
    }

    #[test]
    fn sex_filter_applies() {
        let selection = HealthSelection {
            indicator: Some("Life expectancy".into()),
            sex: "Female".into(),
        };
        let panel = view(&prepare(&raw()), &selection).unwrap();
        assert_eq!(panel.table.len(), 1);
        assert_eq!(panel.table.get(0).unwrap().number(Column::Value), Some(84.9));
    }

    #[test]
    fn sex_filter_ignored_without_breakdown() {
        let selection = HealthSelection {
            indicator: Some("Infant mortality".into()),
            sex: "Female".into(),
        };
        let panel = view(&prepare(&raw()), &selection).unwrap();
        assert_eq!(panel.table.len(), 2);
        let first = panel.table.get(0).unwrap();
        assert_eq!(first.number(Column::Year), Some(2018.0));
        assert!(first.get(Column::Value).is_missing());
    }

    #[test]
    fn empty_dataset_gives_empty_panel() {
        let data = prepare(&raw()).head(0);
        let panel = view(&data, &HealthSelection::default()).unwrap();
        assert!(panel.table.is_empty());
    }
}
