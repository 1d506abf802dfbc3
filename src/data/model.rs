use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ColumnError;

// ---------------------------------------------------------------------------
// Cell – a single value in a table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell: text, number, or missing.
///
/// `NaN` is never stored as a number; [`Cell::number`] maps it to `Missing`.
#[derive(Debug, Clone)]
pub enum Cell {
    Missing,
    Number(f64),
    Text(String),
}

// -- Manual Eq/Ord/Hash so cells can live in sets and be compared exactly --

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        fn discriminant(c: &Cell) -> u8 {
            match c {
                Cell::Missing => 0,
                Cell::Number(_) => 1,
                Cell::Text(_) => 2,
            }
        }
        match (self, other) {
            (Cell::Missing, Cell::Missing) => Ordering::Equal,
            (Cell::Number(a), Cell::Number(b)) => a.total_cmp(b),
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Cell::Missing => {}
            Cell::Number(v) => v.to_bits().hash(state),
            Cell::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => write!(f, "<missing>"),
            Cell::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.0}"),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::number(v)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map_or(Cell::Missing, Into::into)
    }
}

impl Cell {
    /// A numeric cell, or `Missing` for `NaN`.
    pub fn number(v: f64) -> Self {
        if v.is_nan() {
            Cell::Missing
        } else {
            Cell::Number(v)
        }
    }

    /// Guess the type of a raw text field: empty → missing, numeric → number,
    /// anything else stays text.
    pub fn guess(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Missing;
        }
        match parse_number(trimmed) {
            Some(v) => Cell::number(v),
            None => Cell::Text(trimmed.to_string()),
        }
    }

    /// Try to interpret the cell as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Categorical equality against a user-supplied value.
    ///
    /// Text compares verbatim, numbers compare numerically, missing never matches.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Cell::Text(s) => s == value,
            Cell::Number(v) => parse_number(value.trim()) == Some(*v),
            Cell::Missing => false,
        }
    }
}

pub(crate) fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| !v.is_nan())
}

// ---------------------------------------------------------------------------
// Column – the fixed schema
// ---------------------------------------------------------------------------

/// Every column a dashboard knows how to read.
///
/// Source files may carry other columns; loaders ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    IndicatorName,
    Year,
    Value,
    Sex,
    Municipality,
    TotalCasualties,
    TotalDeaths,
    CurrentlyHospitalized,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::IndicatorName,
        Column::Year,
        Column::Value,
        Column::Sex,
        Column::Municipality,
        Column::TotalCasualties,
        Column::TotalDeaths,
        Column::CurrentlyHospitalized,
    ];

    /// The header text used in source files.
    pub fn header(self) -> &'static str {
        match self {
            Column::IndicatorName => "Indicator_Name",
            Column::Year => "Year",
            Column::Value => "Value",
            Column::Sex => "Sex",
            Column::Municipality => "Municipality",
            Column::TotalCasualties => "Total Casualties",
            Column::TotalDeaths => "Total Deaths",
            Column::CurrentlyHospitalized => "Currently Hospitalized",
        }
    }

    /// Match a source header against the schema.
    pub fn from_header(header: &str) -> Option<Column> {
        let header = header.trim();
        Column::ALL.into_iter().find(|c| c.header() == header)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for Column {
    type Err = ColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::from_header(s).ok_or_else(|| ColumnError::Unknown {
            name: s.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Record – one row
// ---------------------------------------------------------------------------

static MISSING: Cell = Cell::Missing;

/// A single row. Columns absent from the map read as [`Cell::Missing`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Record {
    cells: BTreeMap<Column, Cell>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter used when assembling rows before they are frozen
    /// inside a [`Dataset`].
    pub fn with(mut self, column: Column, cell: impl Into<Cell>) -> Self {
        self.cells.insert(column, cell.into());
        self
    }

    pub(crate) fn insert(&mut self, column: Column, cell: Cell) {
        self.cells.insert(column, cell);
    }

    pub fn get(&self, column: Column) -> &Cell {
        self.cells.get(&column).unwrap_or(&MISSING)
    }

    /// Typed accessor for categorical columns.
    pub fn text(&self, column: Column) -> Option<&str> {
        self.get(column).as_text()
    }

    /// Typed accessor for numeric columns.
    pub fn number(&self, column: Column) -> Option<f64> {
        self.get(column).as_f64()
    }
}

impl FromIterator<(Column, Cell)> for Record {
    fn from_iter<I: IntoIterator<Item = (Column, Cell)>>(iter: I) -> Self {
        Record {
            cells: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – a loaded table or a view derived from one
// ---------------------------------------------------------------------------

/// An immutable table.
///
/// Records are shared behind an `Arc`; filters and sorts produce new views
/// that reorder or restrict `rows` without touching the records themselves.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    records: Arc<[Record]>,
    /// Indices into `records`, in view order.
    rows: Vec<usize>,
}

impl Dataset {
    /// Freeze a set of rows. `columns` lists the columns the source carried,
    /// in source order; duplicates are dropped.
    pub fn from_records(columns: Vec<Column>, records: Vec<Record>) -> Self {
        let mut seen = HashSet::new();
        let columns = columns.into_iter().filter(|c| seen.insert(*c)).collect();
        let rows = (0..records.len()).collect();
        Dataset {
            columns,
            records: records.into(),
            rows,
        }
    }

    /// A view over the same records with a different row selection.
    pub(crate) fn derive(&self, rows: Vec<usize>) -> Dataset {
        Dataset {
            columns: self.columns.clone(),
            records: Arc::clone(&self.records),
            rows,
        }
    }

    /// Pairs of (record index, record) in view order.
    pub(crate) fn indexed(&self) -> impl Iterator<Item = (usize, &Record)> + '_ {
        self.rows.iter().map(move |&i| (i, &self.records[i]))
    }

    /// Number of rows in this view.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Fail with [`ColumnError::Absent`] unless the dataset carries `column`.
    pub fn require(&self, column: Column) -> Result<(), ColumnError> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(ColumnError::Absent { column })
        }
    }

    pub fn require_all(&self, columns: &[Column]) -> Result<(), ColumnError> {
        columns.iter().try_for_each(|&c| self.require(c))
    }

    /// Rows in view order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.rows.iter().map(move |&i| &self.records[i])
    }

    pub fn get(&self, position: usize) -> Option<&Record> {
        self.rows.get(position).map(|&i| &self.records[i])
    }

    /// All cells of one column, in view order.
    pub fn column(&self, column: Column) -> Result<impl Iterator<Item = &Cell> + '_, ColumnError> {
        self.require(column)?;
        Ok(self.iter().map(move |r| r.get(column)))
    }

    /// Distinct non-missing values of a column, in first-appearance order.
    pub fn distinct(&self, column: Column) -> Result<Vec<Cell>, ColumnError> {
        let mut seen = HashSet::new();
        Ok(self
            .column(column)?
            .filter(|c| !c.is_missing())
            .filter(|c| seen.insert(*c))
            .cloned()
            .collect())
    }

    /// Smallest and largest number in a column, ignoring non-numeric cells.
    /// `None` when the column holds no numbers.
    pub fn numeric_bounds(&self, column: Column) -> Result<Option<(f64, f64)>, ColumnError> {
        Ok(self
            .column(column)?
            .filter_map(Cell::as_f64)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            }))
    }

    /// Copy the rows of this view out as owned records.
    pub fn to_records(&self) -> Vec<Record> {
        self.iter().cloned().collect()
    }
}

impl PartialEq for Dataset {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns && self.iter().eq(other.iter())
    }
}
