use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};
use health_dashboards::dashboard::{ChartKind, Panel};

use crate::color::ColorMap;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart (central panel)
// ---------------------------------------------------------------------------

/// Render the active dashboard's chart in the central panel.
pub fn chart(ui: &mut Ui, state: &AppState) {
    let (Some(panel), Some(colors)) = (&state.panel, &state.color_map) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data to show  (File → Open… to pick a source)");
        });
        return;
    };

    ui.heading(&panel.chart.title);

    match panel.chart.kind {
        ChartKind::Line => line_chart(ui, panel, colors),
        ChartKind::Bar => bar_chart(ui, panel, colors),
    }
}

fn line_chart(ui: &mut Ui, panel: &Panel, colors: &ColorMap) {
    let spec = &panel.chart;
    let series = spec.line_series(&panel.table);

    Plot::new("line_chart")
        .legend(Legend::default())
        .x_axis_label(spec.x.header())
        .y_axis_label(spec.y.header())
        .height(ui.available_height() * 0.6)
        .show(ui, |plot_ui| {
            for s in &series {
                let color = colors.color_for(&s.name);
                let points: PlotPoints = s.points.iter().copied().collect();
                plot_ui.line(Line::new(points).name(&s.name).color(color).width(1.5));

                if spec.markers {
                    let markers: PlotPoints = s.points.iter().copied().collect();
                    plot_ui.points(Points::new(markers).name(&s.name).color(color).radius(3.0));
                }
            }
        });
}

fn bar_chart(ui: &mut Ui, panel: &Panel, colors: &ColorMap) {
    let spec = &panel.chart;
    let bars = spec.bars(&panel.table);

    Plot::new("bar_chart")
        .legend(Legend::default())
        .x_axis_label(spec.x.header())
        .y_axis_label(spec.y.header())
        .height(ui.available_height() * 0.6)
        .show_x(false)
        .show(ui, |plot_ui| {
            // One chart per category so each gets its own legend entry.
            for (i, bar) in bars.iter().enumerate() {
                let color = colors.color_for(&bar.label);
                let chart = BarChart::new(vec![Bar::new(i as f64, bar.value)
                    .name(&bar.label)
                    .fill(color)])
                .name(&bar.label)
                .color(color);
                plot_ui.bar_chart(chart);
            }
        });
}
