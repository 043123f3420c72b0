use eframe::egui::{self, ScrollArea, Ui};

use crate::data::model::Dataset;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PremiumLensApp {
    pub state: AppState,
}

impl PremiumLensApp {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            state: AppState::new(dataset),
        }
    }
}

impl eframe::App for PremiumLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: metric tiles + chart grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.vertical_centered(|ui: &mut Ui| {
                        ui.heading("Health Insurance Analysis");
                    });
                    ui.add_space(8.0);

                    panels::metric_tiles(ui, &self.state.summary);
                    ui.add_space(12.0);

                    // First row: heatmap, age scatter, bars, region box.
                    ui.columns(4, |cols: &mut [Ui]| {
                        charts::heatmap(&mut cols[0], self.state.heatmap.as_ref());
                        charts::age_scatter(&mut cols[1], &self.state.age_scatter);
                        charts::smoker_bars(&mut cols[2], &self.state.smoker_bars);
                        panels::region_selector(&mut cols[3], &mut self.state);
                        charts::region_box(&mut cols[3], &self.state.region_box);
                    });
                    ui.add_space(16.0);

                    charts::bmi_scatter(ui, &self.state.bmi_scatter);
                    ui.add_space(16.0);

                    charts::scatter_matrix(ui, &self.state.high_cost);

                    if self.state.show_table {
                        ui.add_space(16.0);
                        ui.separator();
                        panels::records_table(ui, &self.state);
                    }
                });
        });
    }
}
