use crate::data::model::{Cell, Column, Dataset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

/// What to draw and which columns feed it. Rendering is up to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x: Column,
    pub y: Column,
    /// Split lines by this column's values.
    pub series: Option<Column>,
    pub markers: bool,
}

/// One named line of `(x, y)` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

/// One bar: category label and height.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

impl ChartSpec {
    pub fn line(title: impl Into<String>, x: Column, y: Column) -> Self {
        ChartSpec {
            kind: ChartKind::Line,
            title: title.into(),
            x,
            y,
            series: None,
            markers: false,
        }
    }

    pub fn bar(title: impl Into<String>, x: Column, y: Column) -> Self {
        ChartSpec {
            kind: ChartKind::Bar,
            title: title.into(),
            x,
            y,
            series: None,
            markers: false,
        }
    }

    pub fn split_by(mut self, column: Column) -> Self {
        self.series = Some(column);
        self
    }

    pub fn with_markers(mut self) -> Self {
        self.markers = true;
        self
    }

    /// Group rows into lines. Series appear in first-appearance order; rows
    /// without a numeric x and y, or without a value in the series column, are
    /// skipped.
    pub fn line_series(&self, data: &Dataset) -> Vec<Series> {
        let mut out: Vec<Series> = Vec::new();
        for record in data.iter() {
            let (Some(x), Some(y)) = (record.number(self.x), record.number(self.y)) else {
                continue;
            };
            let name = match self.series {
                Some(col) => match record.get(col) {
                    Cell::Missing => continue,
                    cell => cell.to_string(),
                },
                None => self.y.header().to_string(),
            };
            match out.iter_mut().find(|s| s.name == name) {
                Some(series) => series.points.push([x, y]),
                None => out.push(Series {
                    name,
                    points: vec![[x, y]],
                }),
            }
        }
        out
    }

    /// One bar per row with a numeric y, labelled by the x cell.
    pub fn bars(&self, data: &Dataset) -> Vec<Bar> {
        data.iter()
            .filter_map(|record| {
                record.number(self.y).map(|value| Bar {
                    label: record.get(self.x).to_string(),
                    value,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::Record;

    fn by_sex() -> Dataset {
        let rows = [
            (Some(2015.0), "Male", Some(10.0)),
            (Some(2015.0), "Female", Some(3.0)),
            (Some(2016.0), "Male", None),
            (None, "Female", Some(4.0)),
            (Some(2016.0), "Female", Some(3.5)),
        ];
        Dataset::from_records(
            vec![Column::Year, Column::Sex, Column::Value],
            rows.iter()
                .map(|&(year, sex, value)| {
                    Record::new()
                        .with(Column::Year, year)
                        .with(Column::Sex, sex)
                        .with(Column::Value, value)
                })
                .collect(),
        )
    }

    #[test]
    fn series_grouped_in_first_appearance_order() {
        let spec = ChartSpec::line("t", Column::Year, Column::Value).split_by(Column::Sex);
        assert_eq!(
            spec.line_series(&by_sex()),
            vec![
                Series {
                    name: "Male".into(),
                    points: vec![[2015.0, 10.0]]
                },
                Series {
                    name: "Female".into(),
                    points: vec![[2015.0, 3.0], [2016.0, 3.5]]
                },
            ]
        );
    }

    #[test]
    fn single_series_named_after_y() {
        let spec = ChartSpec::line("t", Column::Year, Column::Value);
        let series = spec.line_series(&by_sex());
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "Value");
        assert_eq!(series[0].points.len(), 3);
    }

    #[test]
    fn bars_skip_missing_heights() {
        let ds = Dataset::from_records(
            vec![Column::Municipality, Column::TotalDeaths],
            vec![
                Record::new()
                    .with(Column::Municipality, "Sderot")
                    .with(Column::TotalDeaths, 12.0),
                Record::new()
                    .with(Column::Municipality, "Ofakim")
                    .with(Column::TotalDeaths, Cell::Missing),
            ],
        );
        let spec = ChartSpec::bar("t", Column::Municipality, Column::TotalDeaths);
        assert_eq!(
            spec.bars(&ds),
            vec![Bar {
                label: "Sderot".into(),
                value: 12.0
            }]
        );
    }

    #[test]
    fn rows_without_a_series_value_are_not_drawn() {
        let ds = Dataset::from_records(
            vec![Column::Year, Column::Sex, Column::Value],
            vec![
                Record::new()
                    .with(Column::Year, 2016.0)
                    .with(Column::Sex, "Male")
                    .with(Column::Value, 3.0),
                Record::new()
                    .with(Column::Year, 2017.0)
                    .with(Column::Value, 4.0),
            ],
        );
        let spec = ChartSpec::line("t", Column::Year, Column::Value).split_by(Column::Sex);
        let series = spec.line_series(&ds);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "Male");
        assert_eq!(series[0].points, vec![[2016.0, 3.0]]);
    }
}
