/// Data layer: table type, loading, transforms, filtering and export.
///
/// Architecture:
/// ```text
///  remote sheet / local .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  expand   │  one row per multi-section block
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  region / author predicates → displayed Table
///   └──────────┘
///        │
///        ├──▶ overlay  spans + bands (read-only)
///        ├──▶ metrics  non-empty count
///        └──▶ export   displayed Table → .csv
/// ```

pub mod expand;
pub mod export;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod overlay;
