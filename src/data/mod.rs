/// Data layer: bundled sample, cleaning and normalization.
///
/// Architecture:
/// ```text
///  assets/penguins.csv (embedded)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → Vec<RawRecord>, drop incomplete → Vec<Record>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  z-score then min-max per column, colour column
///   └───────────┘
///        │
///        ▼
///   PreparedTable (read-only for the rest of the process)
/// ```

pub mod loader;
pub mod model;
pub mod normalize;

use anyhow::{Context, Result};

use model::PreparedTable;

/// Load the bundled sample and prepare it for plotting.
pub fn load_prepared() -> Result<PreparedTable> {
    let records = loader::load_bundled()?;
    normalize::prepare(records).context("preparing penguins table")
}
