use std::sync::Arc;

use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, Points};

use crate::config::ExplorerConfig;
use crate::state::{PlotState, ScatterSource};

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the scatter plot for the current encoding.
pub fn scatter_plot(ui: &mut Ui, state: &PlotState, config: &ExplorerConfig) {
    ui.heading(&config.plot_title);

    // Bokeh-style size is a diameter.
    let radius = f32::from(state.marker_size) / 2.0;
    let hover_source = Arc::clone(&state.source);

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .x_axis_label(state.x_label.as_str())
        .y_axis_label(state.y_label.as_str())
        .width(config.plot_width)
        .height(config.plot_height)
        .include_x(0.0)
        .include_x(1.0)
        .include_y(0.0)
        .include_y(1.0)
        .label_formatter(move |_name, point| hover_text(&hover_source, point))
        .show(ui, |plot_ui| {
            for marker in markers(&state.source) {
                let points = Points::new(vec![marker.position])
                    .name(marker.legend)
                    .color(marker.color)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(radius);
                plot_ui.points(points);
            }
        });
}

/// One plotted row.
#[derive(Debug, PartialEq)]
pub struct Marker<'a> {
    pub position: [f64; 2],
    pub color: Color32,
    /// Legend entry; markers with the same species share one.
    pub legend: &'a str,
}

/// One item per row so each marker keeps its own colour.
pub fn markers(source: &ScatterSource) -> impl Iterator<Item = Marker<'_>> {
    (0..source.len()).map(move |i| Marker {
        position: [source.x[i], source.y[i]],
        color: source.colors[i].to_color32(),
        legend: &source.species[i],
    })
}

/// Describe the row nearest to `point`.
pub fn hover_text(source: &ScatterSource, point: &PlotPoint) -> String {
    let nearest = (0..source.len()).min_by(|&a, &b| {
        let da = (source.x[a] - point.x).powi(2) + (source.y[a] - point.y).powi(2);
        let db = (source.x[b] - point.x).powi(2) + (source.y[b] - point.y).powi(2);
        da.total_cmp(&db)
    });

    match nearest {
        Some(i) => format!(
            "{} ({}, {})\nx = {:.3}\ny = {:.3}\ncolor = {}",
            source.species[i],
            source.island[i],
            source.sex[i].as_deref().unwrap_or("unknown"),
            source.x[i],
            source.y[i],
            source.colors[i],
        ),
        None => format!("x = {:.3}\ny = {:.3}", point.x, point.y),
    }
}
