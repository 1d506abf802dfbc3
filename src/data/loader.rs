use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::error::ArrowError;
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Cell, Column, Dataset, Record};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`, `.tsv` / `.tab` – delimited text with a header row
/// * `.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods` – first worksheet, header in row 1
/// * `.parquet` / `.pq` – flat columns of strings and numbers
/// * `.json` – `[{ "Year": 2020, "Value": 1.5, ... }, ...]`
///
/// Only headers that name a [`Column`] are kept.
pub fn load(path: &Path) -> Result<Dataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_delimited(path, b','),
        "tsv" | "tab" => load_delimited(path, b'\t'),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_spreadsheet(path),
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        other => Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: other.to_string(),
        }),
    }?;

    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        dataset.len(),
        dataset.columns(),
        path.display()
    );
    Ok(dataset)
}

/// Map source headers onto the schema. Unknown headers map to `None`.
fn resolve_headers<'a>(
    path: &Path,
    headers: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<Option<Column>>, LoadError> {
    let mut resolved: Vec<Option<Column>> = Vec::new();
    for header in headers {
        let column = Column::from_header(header);
        match column {
            Some(c) if resolved.contains(&Some(c)) => {
                return Err(LoadError::malformed(
                    path,
                    format!("column '{c}' appears more than once"),
                ));
            }
            Some(_) => {}
            None => log::debug!("Ignoring column '{header}' in {}", path.display()),
        }
        resolved.push(column);
    }
    Ok(resolved)
}

fn known_columns(resolved: &[Option<Column>]) -> Vec<Column> {
    resolved.iter().flatten().copied().collect()
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row with column names; every row must have the same field count.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Dataset, LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(csv_err)?;

    let headers = reader.headers().map_err(csv_err)?.clone();
    if headers.is_empty() {
        return Err(LoadError::malformed(path, "no header row"));
    }
    let resolved = resolve_headers(path, headers.iter())?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(csv_err)?;
        let record: Record = resolved
            .iter()
            .zip(row.iter())
            .filter_map(|(col, raw)| col.map(|c| (c, Cell::guess(raw))))
            .collect();
        records.push(record);
    }

    Ok(Dataset::from_records(known_columns(&resolved), records))
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

/// Reads the first worksheet. String cells stay text even when they look
/// numeric; callers coerce the columns they need.
fn load_spreadsheet(path: &Path) -> Result<Dataset, LoadError> {
    let sheet_err = |source| LoadError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(sheet_err)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LoadError::malformed(path, "workbook has no worksheets"))?;
    let range = workbook.worksheet_range(&sheet_name).map_err(sheet_err)?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(LoadError::malformed(path, "no header row"));
    };
    let header_text: Vec<String> = header_row.iter().map(|d| d.to_string()).collect();
    let resolved = resolve_headers(path, header_text.iter().map(String::as_str))?;

    let records: Vec<Record> = rows
        .map(|row| {
            resolved
                .iter()
                .zip(row.iter())
                .filter_map(|(col, data)| col.map(|c| (c, spreadsheet_cell(data))))
                .collect()
        })
        .collect();

    log::debug!("Read sheet '{sheet_name}' from {}", path.display());
    Ok(Dataset::from_records(known_columns(&resolved), records))
}

fn spreadsheet_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Missing,
        Data::Int(i) => Cell::number(*i as f64),
        Data::Float(f) => Cell::number(*f),
        Data::DateTime(dt) => Cell::number(dt.as_f64()),
        Data::String(s) if s.trim().is_empty() => Cell::Missing,
        Data::String(s) => Cell::Text(s.trim().to_string()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Flat columns only. Every integer, unsigned, float and decimal column is
/// read as numbers; `Utf8`, `LargeUtf8`, `Utf8View` and dictionary-encoded
/// strings (Pandas categoricals) are read as text. Booleans become
/// `"true"` / `"false"`.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let parquet_err = |source| LoadError::Parquet {
        path: path.to_path_buf(),
        source,
    };
    let arrow_err = |source| LoadError::Arrow {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(parquet_err)?;
    let field_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let resolved = resolve_headers(path, field_names.iter().map(String::as_str))?;
    let reader = builder.build().map_err(parquet_err)?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.map_err(arrow_err)?;
        let columns: Vec<Option<(Column, ArrayRef)>> = resolved
            .iter()
            .enumerate()
            .map(|(idx, col)| {
                col.map(|c| normalize(batch.column(idx)).map(|array| (c, array)))
                    .transpose()
            })
            .collect::<Result<_, _>>()
            .map_err(arrow_err)?;

        for row in 0..batch.num_rows() {
            let record: Record = columns
                .iter()
                .flatten()
                .map(|(c, array)| (*c, arrow_cell(array, row)))
                .collect();
            records.push(record);
        }
    }

    Ok(Dataset::from_records(known_columns(&resolved), records))
}

/// Bring a column to `Float64`, `Utf8` or `Boolean` so cells can be read
/// with a single accessor per kind.
fn normalize(col: &ArrayRef) -> Result<ArrayRef, ArrowError> {
    match col.data_type() {
        DataType::Float64 | DataType::Utf8 | DataType::Boolean => Ok(col.clone()),
        t if t.is_numeric() => cast(col.as_ref(), &DataType::Float64),
        DataType::LargeUtf8 | DataType::Utf8View | DataType::Dictionary(_, _) => {
            cast(col.as_ref(), &DataType::Utf8)
        }
        _ => Ok(col.clone()),
    }
}

/// Extract a single cell from a normalized Arrow column at a given row.
fn arrow_cell(col: &ArrayRef, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Missing;
    }
    match col.data_type() {
        DataType::Utf8 => Cell::guess(col.as_string::<i32>().value(row)),
        DataType::Float64 => Cell::number(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => Cell::Text(col.as_boolean().value(row).to_string()),
        other => {
            log::debug!("Unsupported arrow type {other:?}, reading as missing");
            Cell::Missing
        }
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// Columns keep the key order of the first row that names them.
///
/// ```json
/// [
///   { "Indicator_Name": "Life expectancy", "Year": 2019, "Value": 82.6 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::malformed(path, "expected a top-level JSON array"))?;

    let mut columns: Vec<Column> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| LoadError::malformed(path, format!("row {i} is not a JSON object")))?;

        let mut record = Record::new();
        for (key, val) in obj {
            let Some(column) = Column::from_header(key) else {
                continue;
            };
            if !columns.contains(&column) {
                columns.push(column);
            }
            record.insert(column, json_cell(val));
        }
        records.push(record);
    }

    Ok(Dataset::from_records(columns, records))
}

fn json_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::Null => Cell::Missing,
        JsonValue::Number(n) => n.as_f64().map_or(Cell::Missing, Cell::number),
        JsonValue::String(s) => Cell::guess(s),
        JsonValue::Bool(b) => Cell::Text(b.to_string()),
        other => Cell::Text(other.to_string()),
    }
}
