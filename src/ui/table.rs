use eframe::egui::{self, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};
use health_dashboards::Dataset;

/// Collapsible raw-data view of the query result.
pub fn raw_data(ui: &mut Ui, data: &Dataset) {
    egui::CollapsingHeader::new("Show raw data")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            let columns = data.columns();
            TableBuilder::new(ui)
                .striped(true)
                .columns(TableColumn::auto().resizable(true), columns.len())
                .header(20.0, |mut header| {
                    for column in columns {
                        header.col(|ui| {
                            ui.strong(column.header());
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, data.len(), |mut row| {
                        let Some(record) = data.get(row.index()) else {
                            return;
                        };
                        for &column in columns {
                            row.col(|ui| {
                                ui.label(record.get(column).to_string());
                            });
                        }
                    });
                });
        });
}
