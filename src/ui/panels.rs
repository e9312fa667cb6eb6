use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Title, description and a one-line status of what is shown.
pub fn header(ui: &mut Ui, state: &AppState) {
    ui.add_space(4.0);
    ui.heading(RichText::new("Mental Health Care Access During COVID-19").strong());
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        ui.label(
            "This dashboard explores how mental health care access in the past 4 weeks \
             varied by ",
        );
        ui.label(RichText::new("state, gender, and time period").strong());
        ui.label(" using data from the U.S. Census Household Pulse Survey.");
    });
    ui.label(
        RichText::new(format!(
            "{} rows loaded, {} matching the current filters",
            state.table().len(),
            state.view.row_count
        ))
        .weak(),
    );
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Data");
    ui.separator();

    if state.groups.is_empty() {
        ui.label("The dataset has no groups.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Grouping (single choice) ----
            ui.strong("Select Grouping");
            let current = state.selection.group.clone().unwrap_or_default();
            let groups = state.groups.clone();
            egui::ComboBox::from_id_salt("grouping")
                .selected_text(&current)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for group in &groups {
                        if ui.selectable_label(current == *group, group).clicked() {
                            state.select_group(group);
                        }
                    }
                });
            ui.separator();

            // ---- Subgroups (multi choice, options depend on the group) ----
            let options = state.subgroup_options.clone();
            let header_text = format!(
                "Select Subgroup(s)  ({}/{})",
                state.selection.subgroups.len(),
                options.len()
            );
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("subgroups")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_subgroups();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_subgroups();
                        }
                    });
                    for subgroup in &options {
                        let mut checked = state.selection.subgroups.contains(subgroup);
                        let text = RichText::new(subgroup).color(state.color_map.color_for(subgroup));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_subgroup(subgroup);
                        }
                    }
                });
            ui.separator();

            // ---- Time periods (multi choice, global) ----
            let options = state.time_period_options.clone();
            let header_text = format!(
                "Select Time Period(s)  ({}/{})",
                state.selection.time_periods.len(),
                options.len()
            );
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("time_periods")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_time_periods();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_time_periods();
                        }
                    });
                    for period in &options {
                        let mut checked = state.selection.time_periods.contains(period);
                        if ui.checkbox(&mut checked, period).changed() {
                            state.toggle_time_period(period);
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

pub fn footer(ui: &mut Ui) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Data Source: U.S. Census Bureau Household Pulse Survey via");
        ui.hyperlink_to("data.gov", "https://data.gov");
    });
}
