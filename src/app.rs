use std::sync::Arc;

use eframe::egui::{self, ScrollArea, Ui};

use crate::data::model::SurveyTable;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(table: Arc<SurveyTable>) -> Self {
        Self {
            state: AppState::new(table),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title ----
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            panels::header(ui, &self.state);
        });

        // ---- Bottom panel: attribution ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            panels::footer(ui);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui: &mut Ui| {
                let state = &self.state;

                ui.heading("Mental Health Care Access Over Time");
                plot::chart_slot(ui, "time_series_plot", &state.view.time_series, &state.color_map);
                ui.add_space(12.0);

                ui.heading("Average Mental Health Care Access by Subgroup");
                plot::chart_slot(ui, "bar_plot", &state.view.bar, &state.color_map);
            });
        });
    }
}
