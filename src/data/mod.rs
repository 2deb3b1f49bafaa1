/// Data layer: core types, coercion, loading, and filtering.
///
/// Architecture:
/// ```text
///   netflix_cleaned_sample.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV (cells typed by coerce) → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  columns + typed rows, category/week indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  category + date range → FilteredView (row indices)
///   └──────────┘
/// ```

pub mod coerce;
pub mod filter;
pub mod loader;
pub mod model;
