use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;
use crate::stats::Summary;

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

        ui.label(format!(
            "{} records, {} regions",
            state.dataset.len(),
            state.dataset.regions.len()
        ));

        ui.separator();

        if ui
            .selectable_label(state.show_table, "Records table")
            .clicked()
        {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Key-metric tiles
// ---------------------------------------------------------------------------

/// The three summary tiles.  An undefined mean reads "n/a", never zero.
pub fn metric_tiles(ui: &mut Ui, summary: &Summary) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric_tile(&mut cols[0], "Average Cost", money(summary.mean_charges));
        metric_tile(&mut cols[1], "Average BMI", plain(summary.mean_bmi));
        metric_tile(&mut cols[2], "Average Age", plain(summary.mean_age));
    });
}

fn metric_tile(ui: &mut Ui, title: &str, value: String) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().faint_bg_color)
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new(title).small());
                ui.label(RichText::new(value).heading().strong());
            });
        });
}

fn money(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${}", thousands(v)),
        None => "n/a".to_string(),
    }
}

fn plain(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

/// Format with two decimals and a thousands separator ("16,884.92").
fn thousands(v: f64) -> String {
    let negative = v < 0.0;
    let s = format!("{:.2}", v.abs());
    let (int, frac) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let int: String = grouped.chars().rev().collect();
    format!("{}{int}.{frac}", if negative { "-" } else { "" })
}

// ---------------------------------------------------------------------------
// Region selector
// ---------------------------------------------------------------------------

/// Dropdown over the distinct region values present in the data.
pub fn region_selector(ui: &mut Ui, state: &mut AppState) {
    let regions = state.dataset.regions.clone();
    let current = state
        .selected_region
        .clone()
        .unwrap_or_else(|| "—".to_string());

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Region");
        egui::ComboBox::from_id_salt("region_filter")
            .selected_text(&current)
            .show_ui(ui, |ui: &mut Ui| {
                for region in &regions {
                    if ui
                        .selectable_label(current == *region, region)
                        .clicked()
                    {
                        state.set_region(region.clone());
                    }
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Raw-records table
// ---------------------------------------------------------------------------

pub fn records_table(ui: &mut Ui, state: &AppState) {
    let records = &state.dataset.records;

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(50.0)) // age
        .column(Column::auto().at_least(60.0)) // sex
        .column(Column::auto().at_least(50.0)) // bmi
        .column(Column::auto().at_least(60.0)) // children
        .column(Column::auto().at_least(60.0)) // smoker
        .column(Column::auto().at_least(90.0)) // region
        .column(Column::remainder()) // charges
        .header(20.0, |mut header| {
            for title in ["age", "sex", "bmi", "children", "smoker", "region", "charges"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, records.len(), |mut row| {
                let rec = &records[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(opt_num(rec.age, 0));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.sex.as_deref().unwrap_or("–"));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(opt_num(rec.bmi, 1));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(
                        rec.children
                            .map(|c| c.to_string())
                            .unwrap_or_else(|| "–".to_string()),
                    );
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.smoker.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.region);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(opt_num(rec.charges, 2));
                });
            });
        });
}

fn opt_num(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "–".to_string(),
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Replace the dataset from disk.  A failed load keeps the previous dataset
/// and surfaces the error in the top bar.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open insurance data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records across regions {:?}",
                    dataset.len(),
                    dataset.regions
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(thousands(16884.924), "16,884.92");
        assert_eq!(thousands(999.5), "999.50");
        assert_eq!(thousands(1234567.0), "1,234,567.00");
    }

    #[test]
    fn undefined_metrics_read_na() {
        assert_eq!(money(None), "n/a");
        assert_eq!(plain(None), "n/a");
        assert_eq!(money(Some(8000.0)), "$8,000.00");
    }
}
