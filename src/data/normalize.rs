use thiserror::Error;

use crate::color::map_normalized;

use super::model::{Measurement, PreparedTable, Record};

/// Column whose normalized values drive the colour gradient.
pub const COLOR_SOURCE: Measurement = Measurement::BodyMass;

/// Spread below which a column is treated as constant.
const FLAT_EPSILON: f64 = f64::EPSILON;

#[derive(Debug, Error, PartialEq)]
pub enum PrepareError {
    #[error("dataset is empty after dropping incomplete rows")]
    EmptyDataset,
    #[error("column {column} contains a non-finite value at row {row}")]
    NonFinite { column: Measurement, row: usize },
}

// ---------------------------------------------------------------------------
// Column transforms
// ---------------------------------------------------------------------------

/// Z-score with the population standard deviation.
/// A constant column standardizes to all zeros.
///
/// Z-scores do not change when the column is multiplied by a positive
/// constant, so the column is first divided by its largest magnitude. Sums
/// and squares then stay within [-n, n] and cannot overflow.
/// Non-finite input yields zeros; [`prepare`] rejects it before this point.
pub fn standardize(values: &[f64]) -> Vec<f64> {
    let scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return vec![0.0; values.len()];
    }
    let scaled: Vec<f64> = values.iter().map(|v| v / scale).collect();

    let n = scaled.len() as f64;
    let mean = scaled.iter().sum::<f64>() / n;
    let variance = scaled.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    if std_dev < FLAT_EPSILON {
        vec![0.0; scaled.len()]
    } else {
        scaled.iter().map(|v| (v - mean) / std_dev).collect()
    }
}

/// Min-max scale to [0,1]. A zero range maps everything to 0.
///
/// Works on halved values so `max - min` stays finite for any finite column.
pub fn rescale(values: &[f64]) -> Vec<f64> {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min) * 0.5;
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max) * 0.5;
    let range = max - min;
    if !range.is_finite() || range.abs() < FLAT_EPSILON {
        vec![0.0; values.len()]
    } else {
        values.iter().map(|&v| (v * 0.5 - min) / range).collect()
    }
}

/// Standardize, then rescale. The order matters: z-scores can be negative,
/// so only this order guarantees output in [0,1].
pub fn normalize_column(values: &[f64]) -> Vec<f64> {
    rescale(&standardize(values))
}

// ---------------------------------------------------------------------------
// Table preparation
// ---------------------------------------------------------------------------

/// Normalize every measurement column and derive the static colour column.
pub fn prepare(mut records: Vec<Record>) -> Result<PreparedTable, PrepareError> {
    if records.is_empty() {
        return Err(PrepareError::EmptyDataset);
    }

    for m in Measurement::ALL {
        let column: Vec<f64> = records.iter().map(|r| r.measurements[m]).collect();
        if let Some(row) = column.iter().position(|v| !v.is_finite()) {
            return Err(PrepareError::NonFinite { column: m, row });
        }
        for (record, value) in records.iter_mut().zip(normalize_column(&column)) {
            record.measurements[m] = value;
        }
    }

    let colors = records
        .iter()
        .map(|r| map_normalized(r.measurements[COLOR_SOURCE]))
        .collect();

    Ok(PreparedTable {
        records,
        colors,
        color_source: COLOR_SOURCE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Measurements;
    use proptest::prelude::*;

    fn record(species: &str, values: [f64; 4]) -> Record {
        Record {
            species: species.to_string(),
            island: "Dream".to_string(),
            sex: None,
            measurements: Measurements::new(values[0], values[1], values[2], values[3]),
        }
    }

    #[test]
    fn two_rows_stretch_to_bounds() {
        let records = vec![
            record("Adelie", [39.1, 18.7, 181.0, 3750.0]),
            record("Chinstrap", [46.5, 17.9, 192.0, 3500.0]),
        ];
        let table = prepare(records).unwrap();
        assert_eq!(table.len(), 2);

        for m in Measurement::ALL {
            let col = table.column(m);
            assert!(col.contains(&0.0), "{m} has no 0: {col:?}");
            assert!(col.contains(&1.0), "{m} has no 1: {col:?}");
        }
        assert_eq!(table.species(), ["Adelie", "Chinstrap"]);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert_eq!(prepare(Vec::new()).unwrap_err(), PrepareError::EmptyDataset);
    }

    #[test]
    fn non_finite_value_is_rejected() {
        let records = vec![
            record("Adelie", [39.1, 18.7, 181.0, 3750.0]),
            record("Adelie", [39.5, f64::NAN, 186.0, 3800.0]),
        ];
        assert_eq!(
            prepare(records).unwrap_err(),
            PrepareError::NonFinite {
                column: Measurement::BillDepth,
                row: 1
            }
        );
    }

    #[test]
    fn constant_column_maps_to_zero() {
        assert_eq!(normalize_column(&[5.0, 5.0, 5.0]), vec![0.0, 0.0, 0.0]);
        assert_eq!(normalize_column(&[7.0]), vec![0.0]);
    }

    #[test]
    fn extreme_magnitudes_do_not_overflow() {
        assert_eq!(standardize(&[1e308, -1e308]), vec![1.0, -1.0]);
        assert_eq!(normalize_column(&[1e308, -1e308]), vec![1.0, 0.0]);
        assert_eq!(normalize_column(&[-1e308, 0.0, 1e308]), vec![0.0, 0.5, 1.0]);
        assert_eq!(normalize_column(&[1e308, 1e308]), vec![0.0, 0.0]);
        assert_eq!(rescale(&[f64::MAX, f64::MIN]), vec![1.0, 0.0]);
    }

    #[test]
    fn reversed_order_is_not_equivalent() {
        let column = [1.0, 2.0, 10.0];
        let fixed = normalize_column(&column);
        let reversed = standardize(&rescale(&column));

        assert!(fixed.iter().all(|v| (0.0..=1.0).contains(v)));
        assert!(reversed.iter().any(|v| *v < 0.0));
        assert_ne!(fixed, reversed);
    }

    #[test]
    fn colors_come_from_body_mass() {
        let records = vec![
            record("Adelie", [30.0, 10.0, 200.0, 3000.0]),
            record("Gentoo", [50.0, 20.0, 180.0, 6000.0]),
        ];
        let table = prepare(records).unwrap();
        assert_eq!(table.color_source, Measurement::BodyMass);
        assert_eq!(table.colors[0], map_normalized(0.0));
        assert_eq!(table.colors[1], map_normalized(1.0));
    }

    proptest! {
        #[test]
        fn prop_normalized_values_in_unit_interval(
            column in proptest::collection::vec(-1.0e300f64..1.0e300, 1..64)
        ) {
            let normalized = normalize_column(&column);
            prop_assert_eq!(normalized.len(), column.len());
            for v in normalized {
                prop_assert!((0.0..=1.0).contains(&v), "out of range: {}", v);
            }
        }

        #[test]
        fn prop_prepare_reproduces_standardize_then_rescale(
            rows in proptest::collection::vec(
                (1.0f64..100.0, 1.0f64..30.0, 150.0f64..250.0, 2500.0f64..6500.0),
                1..32,
            )
        ) {
            let records: Vec<Record> = rows
                .iter()
                .map(|&(a, b, c, d)| record("Gentoo", [a, b, c, d]))
                .collect();
            let raw_columns: Vec<Vec<f64>> = Measurement::ALL
                .iter()
                .map(|&m| records.iter().map(|r| r.measurements[m]).collect())
                .collect();

            let table = prepare(records).unwrap();
            for (m, raw) in Measurement::ALL.iter().zip(raw_columns) {
                prop_assert_eq!(table.column(*m), rescale(&standardize(&raw)));
            }
        }
    }
}
