use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::Measurement;
use crate::state::{ControlEvent, ControlPanel, Select, Session};

// ---------------------------------------------------------------------------
// Control row – x select, y select, marker size
// ---------------------------------------------------------------------------

/// Render the three controls side by side and return the changes made this
/// frame, in the order they happened.
pub fn control_row(ui: &mut Ui, controls: &ControlPanel) -> Vec<ControlEvent> {
    let mut events = Vec::new();

    ui.horizontal(|ui: &mut Ui| {
        if let Some(m) = column_select(ui, "x_select", &controls.x_select) {
            events.push(ControlEvent::XColumn(m));
        }
        ui.separator();
        if let Some(m) = column_select(ui, "y_select", &controls.y_select) {
            events.push(ControlEvent::YColumn(m));
        }
        ui.separator();

        let slider = &controls.size_slider;
        let mut size = slider.value();
        let response = ui.add(
            egui::Slider::new(&mut size, slider.range())
                .step_by(f64::from(slider.step()))
                .text(slider.title),
        );
        if response.changed() {
            events.push(ControlEvent::MarkerSize(size));
        }
    });

    events
}

/// Dropdown over the select's fixed options. Returns the clicked option.
fn column_select(ui: &mut Ui, id: &str, select: &Select) -> Option<Measurement> {
    let mut picked = None;
    ui.vertical(|ui: &mut Ui| {
        ui.label(select.title);
        egui::ComboBox::from_id_salt(id)
            .selected_text(select.value().column_name())
            .show_ui(ui, |ui: &mut Ui| {
                for option in select.options {
                    if ui
                        .selectable_label(select.value() == option, option.column_name())
                        .clicked()
                    {
                        picked = Some(option);
                    }
                }
            });
    });
    picked
}

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

pub fn status_bar(ui: &mut Ui, session: &Session) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} penguins, colour = {} (normalized)",
            session.table.len(),
            session.table.color_source
        ));

        if let Some(msg) = &session.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
