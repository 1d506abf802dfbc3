use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use health_dashboards::dashboard::casualties::Metric;
use health_dashboards::dashboard::DashboardKind;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel for the active dashboard.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.active {
            DashboardKind::HealthIndicators => health_filters(ui, state),
            DashboardKind::BingeDrinking => {
                let span = state.settings.drinking_years;
                ui.label(format!(
                    "Percentage of population engaging in heavy episodic drinking, by sex ({}–{}).",
                    span.from, span.to
                ));
            }
            DashboardKind::MunicipalityCasualties => casualty_filters(ui, state),
        });
}

fn health_filters(ui: &mut Ui, state: &mut AppState) {
    // Collect changes first; the widgets borrow `state` immutably.
    let mut picked_indicator = None;
    let mut picked_sex = None;

    ui.strong("Select Health Indicator:");
    let current = state.health.indicator.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("indicator")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &state.indicator_options {
                if ui.selectable_label(*option == current, option).clicked() {
                    picked_indicator = Some(option.clone());
                }
            }
        });

    if !state.sex_options.is_empty() {
        ui.add_space(8.0);
        ui.strong("Filter by Sex (optional):");
        egui::ComboBox::from_id_salt("sex")
            .selected_text(&state.health.sex)
            .show_ui(ui, |ui: &mut Ui| {
                for option in &state.sex_options {
                    if ui
                        .selectable_label(*option == state.health.sex, option)
                        .clicked()
                    {
                        picked_sex = Some(option.clone());
                    }
                }
            });
    }

    if let Some(indicator) = picked_indicator {
        state.select_indicator(indicator);
    }
    if let Some(sex) = picked_sex {
        state.select_sex(sex);
    }
}

fn casualty_filters(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Choose metric to visualize:");
    let mut metric = state.casualties.metric;
    for option in Metric::ALL {
        ui.radio_value(&mut metric, option, option.to_string());
    }
    if metric != state.casualties.metric {
        state.select_metric(metric);
    }

    ui.add_space(8.0);
    ui.strong("Select number of municipalities to display:");
    let bounds = state.settings.top_n;
    let mut top_n = state.casualties.top_n;
    ui.add(egui::Slider::new(&mut top_n, bounds.min..=bounds.max));
    if top_n != state.casualties.top_n {
        state.set_top_n(top_n);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let mut picked = state.active;
        for kind in DashboardKind::ALL {
            ui.selectable_value(&mut picked, kind, kind.title());
        }
        state.set_dashboard(picked);

        ui.separator();

        if let Some(panel) = &state.panel {
            ui.label(format!("{} rows shown", panel.table.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open data for this dashboard")
        .add_filter(
            "Supported files",
            &["csv", "tsv", "xlsx", "xls", "xlsb", "ods", "parquet", "pq", "json"],
        )
        .add_filter("CSV / TSV", &["csv", "tsv"])
        .add_filter("Spreadsheet", &["xlsx", "xls", "xlsb", "ods"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.open_source(&path);
    }
}
