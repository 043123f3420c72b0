/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, region index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  region predicate → filtered indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
