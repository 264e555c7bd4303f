use std::ops::RangeInclusive;
use std::sync::Arc;

use thiserror::Error;

use crate::color::HexColor;
use crate::data::model::{Measurement, PreparedTable};

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

/// A dropdown over the measurement columns.
#[derive(Debug, Clone)]
pub struct Select {
    pub title: &'static str,
    pub options: [Measurement; 4],
    value: Measurement,
}

impl Select {
    pub fn new(title: &'static str, value: Measurement) -> Self {
        Self {
            title,
            options: Measurement::ALL,
            value,
        }
    }

    pub fn value(&self) -> Measurement {
        self.value
    }

    /// Returns `true` if the value actually changed.
    fn set(&mut self, value: Measurement) -> bool {
        let changed = self.value != value;
        self.value = value;
        changed
    }
}

/// An integer slider with a fixed inclusive range and step.
#[derive(Debug, Clone)]
pub struct Slider {
    pub title: &'static str,
    start: u8,
    end: u8,
    step: u8,
    value: u8,
}

impl Slider {
    /// A zero step is treated as 1; the initial value is constrained too.
    pub fn new(title: &'static str, range: RangeInclusive<u8>, step: u8, value: u8) -> Self {
        let (start, end) = range.into_inner();
        let mut slider = Self {
            title,
            start: start.min(end),
            end: start.max(end),
            step: step.max(1),
            value: start,
        };
        slider.value = slider.constrain(value);
        slider
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn range(&self) -> RangeInclusive<u8> {
        self.start..=self.end
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    /// Clamp into range and snap to the step grid.
    pub fn constrain(&self, value: u8) -> u8 {
        let clamped = value.clamp(self.start, self.end);
        self.start + (clamped - self.start) / self.step * self.step
    }

    fn set(&mut self, value: u8) -> bool {
        let value = self.constrain(value);
        let changed = self.value != value;
        self.value = value;
        changed
    }
}

pub const DEFAULT_X: Measurement = Measurement::BillLength;
pub const DEFAULT_Y: Measurement = Measurement::BillDepth;
pub const DEFAULT_MARKER_SIZE: u8 = 10;

/// A single control value change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    XColumn(Measurement),
    YColumn(Measurement),
    MarkerSize(u8),
}

/// The three input controls shown above the plot.
#[derive(Debug, Clone)]
pub struct ControlPanel {
    pub x_select: Select,
    pub y_select: Select,
    pub size_slider: Slider,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            x_select: Select::new("X-axis Data", DEFAULT_X),
            y_select: Select::new("Y-axis Data", DEFAULT_Y),
            size_slider: Slider::new("Marker Size", 5..=20, 1, DEFAULT_MARKER_SIZE),
        }
    }
}

impl ControlPanel {
    /// Store the event's value. Returns `false` when nothing changed.
    pub fn apply(&mut self, event: ControlEvent) -> bool {
        match event {
            ControlEvent::XColumn(m) => self.x_select.set(m),
            ControlEvent::YColumn(m) => self.y_select.set(m),
            ControlEvent::MarkerSize(size) => self.size_slider.set(size),
        }
    }
}

// ---------------------------------------------------------------------------
// Plot state
// ---------------------------------------------------------------------------

/// Backing data bound to the scatter glyphs. Replaced wholesale on recompute
/// and shared with the renderer without copying.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterSource {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub colors: Vec<HexColor>,
    pub species: Vec<String>,
    pub island: Vec<String>,
    pub sex: Vec<Option<String>>,
}

impl ScatterSource {
    pub fn len(&self) -> usize {
        self.x.len()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RecomputeError {
    #[error("column {column} has {got} values but the colour column has {expected}")]
    LengthMismatch {
        column: Measurement,
        got: usize,
        expected: usize,
    },
}

/// Current visual encoding of the scatter plot.
#[derive(Debug, Clone)]
pub struct PlotState {
    pub x_column: Measurement,
    pub y_column: Measurement,
    pub marker_size: u8,
    pub x_label: String,
    pub y_label: String,
    pub source: Arc<ScatterSource>,
}

impl PlotState {
    /// Build the initial state from the control defaults.
    pub fn new(table: &PreparedTable, controls: &ControlPanel) -> Result<Self, RecomputeError> {
        let mut state = Self {
            x_column: controls.x_select.value(),
            y_column: controls.y_select.value(),
            marker_size: controls.size_slider.value(),
            x_label: String::new(),
            y_label: String::new(),
            source: Arc::default(),
        };
        state.recompute(table, state.x_column, state.y_column)?;
        Ok(state)
    }

    /// Read `x_column`/`y_column` from the table and make them the current
    /// encoding. Colours are always the table's fixed colour column.
    ///
    /// Nothing is modified if the new columns fail validation.
    pub fn recompute(
        &mut self,
        table: &PreparedTable,
        x_column: Measurement,
        y_column: Measurement,
    ) -> Result<(), RecomputeError> {
        let expected = table.colors.len();
        let x = table.column(x_column);
        let y = table.column(y_column);
        for (column, got) in [(x_column, x.len()), (y_column, y.len())] {
            if got != expected {
                return Err(RecomputeError::LengthMismatch {
                    column,
                    got,
                    expected,
                });
            }
        }

        self.source = Arc::new(ScatterSource {
            x,
            y,
            colors: table.colors.clone(),
            species: table.species(),
            island: table.records.iter().map(|r| r.island.clone()).collect(),
            sex: table.records.iter().map(|r| r.sex.clone()).collect(),
        });
        self.x_column = x_column;
        self.y_column = y_column;
        self.x_label = axis_label(x_column.column_name());
        self.y_label = axis_label(y_column.column_name());
        Ok(())
    }
}

/// `bill_length_mm` → `Bill Length Mm (normalized)`.
///
/// Separators become spaces and every letter that follows a non-letter is
/// upper-cased, the rest lower-cased.
pub fn axis_label(column: &str) -> String {
    let mut label = String::with_capacity(column.len() + 13);
    let mut prev_alpha = false;
    for c in column.chars() {
        let c = if c == '_' || c == '-' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_alpha {
                label.extend(c.to_lowercase());
            } else {
                label.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            label.push(c);
            prev_alpha = false;
        }
    }
    label.push_str(" (normalized)");
    label
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Everything one running document needs: the immutable table, the controls
/// and the plot they drive.
pub struct Session {
    pub table: PreparedTable,
    pub controls: ControlPanel,
    pub plot: PlotState,
    /// Last recompute error, shown in the status line.
    pub status_message: Option<String>,
}

impl Session {
    pub fn new(table: PreparedTable) -> Result<Self, RecomputeError> {
        let controls = ControlPanel::default();
        let plot = PlotState::new(&table, &controls)?;
        Ok(Self {
            table,
            controls,
            plot,
            status_message: None,
        })
    }

    /// Apply one control change and recompute once. Unchanged values are ignored.
    ///
    /// The controls and the plot only take the new value if the recompute
    /// succeeds, so a failed change can be retried.
    pub fn dispatch(&mut self, event: ControlEvent) {
        let mut controls = self.controls.clone();
        if !controls.apply(event) {
            return;
        }
        log::debug!("dispatch {event:?}");
        let (x, y) = (controls.x_select.value(), controls.y_select.value());
        match self.plot.recompute(&self.table, x, y) {
            Ok(()) => {
                self.plot.marker_size = controls.size_slider.value();
                self.controls = controls;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to update plot: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Measurements, Record};
    use crate::data::normalize::prepare;

    fn table() -> PreparedTable {
        let rows = [
            ("Adelie", [39.1, 18.7, 181.0, 3750.0]),
            ("Chinstrap", [46.5, 17.9, 192.0, 3500.0]),
            ("Gentoo", [50.0, 16.3, 230.0, 5700.0]),
        ];
        let records = rows
            .iter()
            .map(|(species, v)| Record {
                species: species.to_string(),
                island: "Biscoe".to_string(),
                sex: Some("Male".to_string()),
                measurements: Measurements::new(v[0], v[1], v[2], v[3]),
            })
            .collect();
        prepare(records).unwrap()
    }

    #[test]
    fn axis_label_title_cases_identifier() {
        assert_eq!(axis_label("bill_length_mm"), "Bill Length Mm (normalized)");
        assert_eq!(axis_label("body_mass_g"), "Body Mass G (normalized)");
    }

    #[test]
    fn defaults_match_controls() {
        let session = Session::new(table()).unwrap();
        assert_eq!(session.plot.x_column, Measurement::BillLength);
        assert_eq!(session.plot.y_column, Measurement::BillDepth);
        assert_eq!(session.plot.marker_size, 10);
        assert_eq!(session.plot.x_label, "Bill Length Mm (normalized)");
        assert_eq!(session.plot.y_label, "Bill Depth Mm (normalized)");
        assert_eq!(session.plot.source.len(), 3);
    }

    #[test]
    fn axis_change_keeps_colors_and_species() {
        let mut session = Session::new(table()).unwrap();
        let before = session.plot.source.clone();

        session.dispatch(ControlEvent::XColumn(Measurement::FlipperLength));
        session.dispatch(ControlEvent::YColumn(Measurement::BodyMass));

        let after = &session.plot.source;
        assert_eq!(after.colors, before.colors);
        assert_eq!(after.species, before.species);
        assert_eq!(after.x, session.table.column(Measurement::FlipperLength));
        assert_eq!(after.y, session.table.column(Measurement::BodyMass));
        assert_eq!(session.plot.x_label, "Flipper Length Mm (normalized)");
        assert_eq!(session.plot.y_label, "Body Mass G (normalized)");
        assert_eq!(session.plot.marker_size, 10);
    }

    #[test]
    fn marker_size_change_keeps_data() {
        let mut session = Session::new(table()).unwrap();
        let before = session.plot.source.clone();

        session.dispatch(ControlEvent::MarkerSize(17));

        assert_eq!(session.plot.marker_size, 17);
        assert_eq!(session.plot.source, before);
    }

    #[test]
    fn slider_stays_in_domain() {
        let mut controls = ControlPanel::default();
        assert!(controls.apply(ControlEvent::MarkerSize(40)));
        assert_eq!(controls.size_slider.value(), 20);
        assert!(controls.apply(ControlEvent::MarkerSize(0)));
        assert_eq!(controls.size_slider.value(), 5);
    }

    #[test]
    fn unchanged_value_produces_no_recompute() {
        let mut controls = ControlPanel::default();
        assert!(!controls.apply(ControlEvent::XColumn(DEFAULT_X)));
        assert!(!controls.apply(ControlEvent::MarkerSize(DEFAULT_MARKER_SIZE)));
    }

    #[test]
    fn failed_recompute_leaves_previous_state_and_can_retry() {
        let mut session = Session::new(table()).unwrap();
        let before = session.plot.source.clone();
        let removed = session.table.colors.pop().unwrap();

        session.dispatch(ControlEvent::XColumn(Measurement::BodyMass));

        assert_eq!(session.plot.source, before);
        assert_eq!(session.plot.x_column, Measurement::BillLength);
        assert_eq!(session.plot.x_label, "Bill Length Mm (normalized)");
        assert_eq!(session.controls.x_select.value(), Measurement::BillLength);
        assert!(session.status_message.is_some());

        session.table.colors.push(removed);
        session.dispatch(ControlEvent::XColumn(Measurement::BodyMass));

        assert_eq!(session.plot.x_column, Measurement::BodyMass);
        assert_eq!(session.plot.x_label, "Body Mass G (normalized)");
        assert_eq!(session.plot.source.x, session.table.column(Measurement::BodyMass));
        assert_eq!(session.controls.x_select.value(), Measurement::BodyMass);
        assert_eq!(session.status_message, None);
    }

    #[test]
    fn zero_step_slider_does_not_panic() {
        let slider = Slider::new("Size", 5..=20, 0, 12);
        assert_eq!(slider.step(), 1);
        assert_eq!(slider.value(), 12);
        assert_eq!(slider.constrain(30), 20);
        assert_eq!(slider.range(), 5..=20);
    }

    #[test]
    fn slider_snaps_to_step() {
        let slider = Slider::new("Size", 5..=20, 5, 11);
        assert_eq!(slider.value(), 10);
        assert_eq!(slider.constrain(19), 15);
    }
}
