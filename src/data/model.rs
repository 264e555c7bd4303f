use std::fmt;
use std::ops::{Index, IndexMut};

use serde::Deserialize;

use crate::color::HexColor;

// ---------------------------------------------------------------------------
// Measurement – the four numeric columns
// ---------------------------------------------------------------------------

/// One of the four numeric measurement columns, in dataset order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Measurement {
    BillLength,
    BillDepth,
    FlipperLength,
    BodyMass,
}

impl Measurement {
    /// All measurement columns in their fixed order.
    pub const ALL: [Measurement; 4] = [
        Measurement::BillLength,
        Measurement::BillDepth,
        Measurement::FlipperLength,
        Measurement::BodyMass,
    ];

    /// Column identifier as it appears in the source table.
    pub fn column_name(self) -> &'static str {
        match self {
            Measurement::BillLength => "bill_length_mm",
            Measurement::BillDepth => "bill_depth_mm",
            Measurement::FlipperLength => "flipper_length_mm",
            Measurement::BodyMass => "body_mass_g",
        }
    }

    fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// Measurements – the numeric part of a row
// ---------------------------------------------------------------------------

/// The four measurement values of a single row, indexable by [`Measurement`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements([f64; 4]);

impl Measurements {
    pub fn new(bill_length: f64, bill_depth: f64, flipper_length: f64, body_mass: f64) -> Self {
        Measurements([bill_length, bill_depth, flipper_length, body_mass])
    }
}

impl Index<Measurement> for Measurements {
    type Output = f64;

    fn index(&self, m: Measurement) -> &f64 {
        &self.0[m.position()]
    }
}

impl IndexMut<Measurement> for Measurements {
    fn index_mut(&mut self, m: Measurement) -> &mut f64 {
        &mut self.0[m.position()]
    }
}

// ---------------------------------------------------------------------------
// RawRecord – one CSV row before cleaning
// ---------------------------------------------------------------------------

/// A row exactly as read from the bundled CSV. `NA` cells become `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub species: String,
    pub island: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub bill_length_mm: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub bill_depth_mm: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub flipper_length_mm: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub body_mass_g: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub sex: Option<String>,
}

impl RawRecord {
    /// Convert to a [`Record`] if every measurement is present.
    pub fn complete(self) -> Option<Record> {
        let measurements = Measurements::new(
            self.bill_length_mm?,
            self.bill_depth_mm?,
            self.flipper_length_mm?,
            self.body_mass_g?,
        );
        Some(Record {
            species: self.species,
            island: self.island,
            sex: self.sex.filter(|s| !s.is_empty() && s != "NA"),
            measurements,
        })
    }
}

// ---------------------------------------------------------------------------
// Record – one clean row
// ---------------------------------------------------------------------------

/// A complete row: categorical labels plus four numeric measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub species: String,
    pub island: String,
    pub sex: Option<String>,
    pub measurements: Measurements,
}

// ---------------------------------------------------------------------------
// PreparedTable – normalized rows plus the static colour column
// ---------------------------------------------------------------------------

/// Records with every measurement column normalized to [0,1], and one
/// colour per record derived from `color_source`.
#[derive(Debug, Clone)]
pub struct PreparedTable {
    pub records: Vec<Record>,
    pub colors: Vec<HexColor>,
    pub color_source: Measurement,
}

impl PreparedTable {
    /// Copy out one normalized column.
    pub fn column(&self, m: Measurement) -> Vec<f64> {
        self.records.iter().map(|r| r.measurements[m]).collect()
    }

    pub fn species(&self) -> Vec<String> {
        self.records.iter().map(|r| r.species.clone()).collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
