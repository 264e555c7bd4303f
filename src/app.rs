use eframe::egui;

use crate::config::ExplorerConfig;
use crate::state::Session;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PenguinExplorerApp {
    pub session: Session,
    pub config: ExplorerConfig,
}

impl PenguinExplorerApp {
    pub fn new(session: Session, config: ExplorerConfig) -> Self {
        Self { session, config }
    }
}

impl eframe::App for PenguinExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: controls ----
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            let events = panels::control_row(ui, &self.session.controls);
            // Dispatch in arrival order, one recompute per change.
            for event in events {
                self.session.dispatch(event);
            }
        });

        // ---- Bottom panel: status ----
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            panels::status_bar(ui, &self.session);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::scatter_plot(ui, &self.session.plot, &self.config);
        });
    }
}
