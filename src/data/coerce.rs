use super::model::{parse_number, Cell, Column, Dataset, Record};
use crate::error::CoercionWarning;

impl Dataset {
    /// Parse every text value of the named columns as a number.
    ///
    /// Values that fail to parse become [`Cell::Missing`]; this never fails.
    /// Columns the dataset does not carry are skipped. The result has the same
    /// rows, in the same order.
    pub fn coerce_numeric(&self, columns: &[Column]) -> Dataset {
        let (dataset, warnings) = self.coerce_numeric_with_warnings(columns);
        if !warnings.is_empty() {
            log::warn!(
                "{} value(s) in {:?} were not numeric and are now missing",
                warnings.len(),
                columns
            );
        }
        dataset
    }

    /// Like [`coerce_numeric`](Self::coerce_numeric), also reporting each
    /// value that became missing.
    pub fn coerce_numeric_with_warnings(
        &self,
        columns: &[Column],
    ) -> (Dataset, Vec<CoercionWarning>) {
        let targets: Vec<Column> = columns
            .iter()
            .copied()
            .filter(|&c| {
                let present = self.has_column(c);
                if !present {
                    log::debug!("Skipping coercion of absent column '{c}'");
                }
                present
            })
            .collect();

        let mut warnings = Vec::new();
        let records: Vec<Record> = self
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let mut record = record.clone();
                for &column in &targets {
                    let Cell::Text(raw) = record.get(column) else {
                        continue;
                    };
                    let coerced = match parse_number(raw.trim()) {
                        Some(v) => Cell::number(v),
                        None => {
                            warnings.push(CoercionWarning {
                                column,
                                row,
                                raw: raw.clone(),
                            });
                            Cell::Missing
                        }
                    };
                    record.insert(column, coerced);
                }
                record
            })
            .collect();

        (
            Dataset::from_records(self.columns().to_vec(), records),
            warnings,
        )
    }
}
