//! Load a health or casualty table once, then answer each dashboard
//! interaction with a filtered, sorted, truncated view of it.
//!
//! ```no_run
//! use std::path::Path;
//! use health_dashboards::data::{cache::DatasetCache, model::Column, sort::SortOrder};
//!
//! let mut cache = DatasetCache::new();
//! let raw = cache.get_or_load(Path::new("total_casualties_by_municipality.xlsx"))?;
//! let top = raw
//!     .coerce_numeric(&[Column::TotalDeaths])
//!     .sort_and_top(Column::TotalDeaths, SortOrder::Descending, 10)?;
//! # Ok::<(), health_dashboards::Error>(())
//! ```

pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;

pub use config::Settings;
pub use data::cache::DatasetCache;
pub use data::filter::{FilterSpec, Predicate, ALL};
pub use data::loader::load;
pub use data::model::{Cell, Column, Dataset, Record};
pub use data::query::Query;
pub use data::sort::SortOrder;
pub use error::{CoercionWarning, ColumnError, ConfigError, Error, LoadError, Result};
