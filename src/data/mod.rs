/// Data layer: core types, loading, and the query pipeline.
///
/// Architecture:
/// ```text
///  .csv / .xlsx / .parquet / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset          (cached per source)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  coerce   │  text → number, junk → missing
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  equality / range predicates → derived view
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   sort    │  stable sort, missing last, top-N
///   └──────────┘
/// ```

pub mod cache;
pub mod coerce;
pub mod filter;
pub mod loader;
pub mod model;
pub mod query;
pub mod sort;
