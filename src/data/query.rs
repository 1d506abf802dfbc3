use super::filter::{FilterSpec, Predicate};
use super::model::{Column, Dataset};
use super::sort::SortOrder;
use crate::error::ColumnError;

/// One user interaction's worth of filtering, sorting and truncation.
///
/// Executed as filter → sort → limit. A limit without a sort keeps the first
/// rows in dataset order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: FilterSpec,
    pub sort: Option<(Column, SortOrder)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, column: Column, predicate: Predicate) -> Self {
        self.filters = self.filters.with(column, predicate);
        self
    }

    pub fn sort_by(mut self, column: Column, order: SortOrder) -> Self {
        self.sort = Some((column, order));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Run against `dataset`, returning a new view. The source is untouched.
    pub fn run(&self, dataset: &Dataset) -> Result<Dataset, ColumnError> {
        let filtered = self.filters.apply(dataset)?;
        let sorted = match self.sort {
            Some((column, order)) => filtered.sort_by_column(column, order)?,
            None => filtered,
        };
        Ok(match self.limit {
            Some(n) => sorted.head(n),
            None => sorted,
        })
    }
}
