/// Data layer: records, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .xlsx (sheet ARTICLE) / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  map headers, coerce cells → Catalog
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Catalog  │  Vec<Publication>, search keys, option lists
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Criteria → ordered row indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  per-venue / per-author counts and citations
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
