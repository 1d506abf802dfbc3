use std::cmp::Ordering;

use super::model::{Cell, Column, Dataset};
use crate::error::ColumnError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Compare two sort keys. Missing keys go last in either direction.
fn compare_keys(a: Option<f64>, b: Option<f64>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Ascending => a.total_cmp(&b),
            SortOrder::Descending => b.total_cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl Dataset {
    /// Stable numeric sort on `column`.
    ///
    /// Fails when the column is absent or any row holds text in it.
    pub fn sort_by_column(&self, column: Column, order: SortOrder) -> Result<Dataset, ColumnError> {
        self.require(column)?;

        let mut keyed = Vec::with_capacity(self.len());
        for (position, (index, record)) in self.indexed().enumerate() {
            let key = match record.get(column) {
                Cell::Number(v) => Some(*v),
                Cell::Missing => None,
                Cell::Text(value) => {
                    return Err(ColumnError::NotNumeric {
                        column,
                        row: position,
                        value: value.clone(),
                    })
                }
            };
            keyed.push((index, key));
        }

        // `sort_by` is stable, so ties keep their current relative order.
        keyed.sort_by(|(_, a), (_, b)| compare_keys(*a, *b, order));
        Ok(self.derive(keyed.into_iter().map(|(i, _)| i).collect()))
    }

    /// Sort by `column`, then keep at most the first `n` rows.
    pub fn sort_and_top(
        &self,
        column: Column,
        order: SortOrder,
        n: usize,
    ) -> Result<Dataset, ColumnError> {
        Ok(self.sort_by_column(column, order)?.head(n))
    }

    /// The first `n` rows in current order.
    pub fn head(&self, n: usize) -> Dataset {
        self.derive(self.indexed().take(n).map(|(i, _)| i).collect())
    }
}
