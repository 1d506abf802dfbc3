use super::model::{Column, Dataset, Record};
use crate::error::ColumnError;

/// Sentinel filter value meaning "do not filter this column".
pub const ALL: &str = "All";

// ---------------------------------------------------------------------------
// Filter predicates
// ---------------------------------------------------------------------------

/// A condition on a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Pass-through.
    Any,
    /// Categorical equality; [`ALL`] behaves like [`Predicate::Any`].
    Equals(String),
    /// Inclusive numeric range. Missing and text cells never match.
    Range { lo: f64, hi: f64 },
}

/// Column predicates combined with logical AND.
///
/// With no clauses every row is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    clauses: Vec<(Column, Predicate)>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: Column, predicate: Predicate) -> Self {
        self.clauses.push((column, predicate));
        self
    }

    pub fn equals(self, column: Column, value: impl Into<String>) -> Self {
        self.with(column, Predicate::Equals(value.into()))
    }

    pub fn range(self, column: Column, lo: f64, hi: f64) -> Self {
        self.with(column, Predicate::Range { lo, hi })
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[(Column, Predicate)] {
        &self.clauses
    }

    /// Apply every clause in turn.
    pub fn apply(&self, dataset: &Dataset) -> Result<Dataset, ColumnError> {
        self.clauses
            .iter()
            .try_fold(dataset.clone(), |ds, (column, predicate)| match predicate {
                Predicate::Any => ds.require(*column).map(|()| ds),
                Predicate::Equals(value) => ds.filter_equals(*column, value),
                Predicate::Range { lo, hi } => ds.filter_range(*column, *lo, *hi),
            })
    }
}

// ---------------------------------------------------------------------------
// Dataset filters
// ---------------------------------------------------------------------------

impl Dataset {
    /// Rows whose `column` equals `value`. [`ALL`] returns the dataset unchanged.
    ///
    /// No matching row is an empty result, not an error.
    pub fn filter_equals(&self, column: Column, value: &str) -> Result<Dataset, ColumnError> {
        self.require(column)?;
        if value == ALL {
            return Ok(self.clone());
        }
        Ok(self.retain(|r| r.get(column).matches(value)))
    }

    /// Rows with `lo <= row[column] <= hi`.
    pub fn filter_range(&self, column: Column, lo: f64, hi: f64) -> Result<Dataset, ColumnError> {
        self.require(column)?;
        Ok(self.retain(|r| r.number(column).is_some_and(|v| lo <= v && v <= hi)))
    }

    /// Apply a whole [`FilterSpec`].
    pub fn filter(&self, spec: &FilterSpec) -> Result<Dataset, ColumnError> {
        spec.apply(self)
    }

    fn retain(&self, keep: impl Fn(&Record) -> bool) -> Dataset {
        let rows = self
            .indexed()
            .filter(|(_, r)| keep(*r))
            .map(|(i, _)| i)
            .collect();
        self.derive(rows)
    }
}
