use anyhow::{Context, Result};

use super::model::{RawRecord, Record};

/// The Palmer penguins sample shipped inside the binary.
const BUNDLED_PENGUINS: &str = include_str!("../../assets/penguins.csv");

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse the bundled sample and drop incomplete rows.
pub fn load_bundled() -> Result<Vec<Record>> {
    let raw = parse_csv(BUNDLED_PENGUINS).context("parsing bundled penguins sample")?;
    let total = raw.len();
    let records = drop_incomplete(raw);
    log::info!(
        "Loaded {} penguin records ({} incomplete rows dropped)",
        records.len(),
        total - records.len()
    );
    Ok(records)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// CSV layout: header row with `species`, `island`, the four measurement
/// columns and `sex`. Missing numbers are written as `NA` or left empty.
pub fn parse_csv(text: &str) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());

    reader
        .deserialize::<RawRecord>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

/// Keep only rows where all four measurements are present.
pub fn drop_incomplete(raw: Vec<RawRecord>) -> Vec<Record> {
    let total = raw.len();
    let records: Vec<Record> = raw.into_iter().filter_map(RawRecord::complete).collect();
    log::debug!("drop_incomplete: kept {} of {total} rows", records.len());
    records
}
