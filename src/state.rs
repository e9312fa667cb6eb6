use std::sync::Arc;

use crate::chart::DashboardView;
use crate::color::ColorMap;
use crate::data::filter::{distinct_groups, distinct_subgroups, distinct_time_periods, Selection};
use crate::data::model::SurveyTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Every method that changes the selection re-runs the pipeline once and
/// stores the result in `view`; rendering only ever reads `view`.
pub struct AppState {
    /// Loaded survey, shared read-only.
    table: Arc<SurveyTable>,

    /// Choices offered by the side panel.
    pub groups: Vec<String>,
    pub subgroup_options: Vec<String>,
    pub time_period_options: Vec<String>,

    /// Current user selection.
    pub selection: Selection,

    /// Output of the last pipeline run.
    pub view: DashboardView,

    /// Colours for the current group's subgroups.
    pub color_map: ColorMap,
}

impl AppState {
    /// Build the initial state: first group chosen, nothing else selected.
    pub fn new(table: Arc<SurveyTable>) -> Self {
        let groups = distinct_groups(&table);
        let time_period_options = distinct_time_periods(&table);
        let mut state = Self {
            table,
            groups,
            subgroup_options: Vec::new(),
            time_period_options,
            selection: Selection::default(),
            view: DashboardView::empty(),
            color_map: ColorMap::default(),
        };
        if let Some(first) = state.groups.first().cloned() {
            state.select_group(&first);
        }
        state
    }

    pub fn table(&self) -> &SurveyTable {
        &self.table
    }

    /// Switch grouping. Subgroups belong to a group, so their selection resets.
    pub fn select_group(&mut self, group: &str) {
        if self.selection.group.as_deref() == Some(group) {
            return;
        }
        self.subgroup_options = distinct_subgroups(&self.table, group);
        self.color_map = ColorMap::new(&self.subgroup_options);
        self.selection.group = Some(group.to_string());
        self.selection.subgroups.clear();
        self.refresh();
    }

    pub fn toggle_subgroup(&mut self, subgroup: &str) {
        if !self.selection.subgroups.remove(subgroup) {
            self.selection.subgroups.insert(subgroup.to_string());
        }
        self.refresh();
    }

    pub fn toggle_time_period(&mut self, period: &str) {
        if !self.selection.time_periods.remove(period) {
            self.selection.time_periods.insert(period.to_string());
        }
        self.refresh();
    }

    pub fn select_all_subgroups(&mut self) {
        self.selection.subgroups = self.subgroup_options.iter().cloned().collect();
        self.refresh();
    }

    pub fn select_no_subgroups(&mut self) {
        self.selection.subgroups.clear();
        self.refresh();
    }

    pub fn select_all_time_periods(&mut self) {
        self.selection.time_periods = self.time_period_options.iter().cloned().collect();
        self.refresh();
    }

    pub fn select_no_time_periods(&mut self) {
        self.selection.time_periods.clear();
        self.refresh();
    }

    /// Re-run filter → aggregate → present for the current selection.
    fn refresh(&mut self) {
        self.view = DashboardView::compute(&self.table, &self.selection);
        log::debug!(
            "Charts updated: time series {}, bar {}",
            if self.view.time_series.has_data() { "shown" } else { "placeholder" },
            if self.view.bar.has_data() { "shown" } else { "placeholder" },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Slot, BAR_PLACEHOLDER, TIME_SERIES_PLACEHOLDER};
    use crate::data::model::Record;

    fn state() -> AppState {
        AppState::new(Arc::new(SurveyTable::from_records(vec![
            Record::new("By State", "California", "Phase 1", 20.0),
            Record::new("By State", "California", "Phase 2", 25.0),
            Record::new("By State", "Texas", "Phase 1", 15.0),
            Record::new("By Sex", "Female", "Phase 1", 12.0),
            Record::new("By Sex", "Male", "Phase 3", 8.0),
        ])))
    }

    #[test]
    fn test_initial_state_has_first_group_and_no_data() {
        let st = state();
        assert_eq!(st.groups, vec!["By Sex", "By State"]);
        assert_eq!(st.selection.group.as_deref(), Some("By Sex"));
        assert_eq!(st.subgroup_options, vec!["Female", "Male"]);
        assert_eq!(st.time_period_options, vec!["Phase 1", "Phase 2", "Phase 3"]);
        assert_eq!(st.view.time_series, Slot::NoData(TIME_SERIES_PLACEHOLDER));
        assert_eq!(st.view.bar, Slot::NoData(BAR_PLACEHOLDER));
    }

    #[test]
    fn test_selecting_subgroups_and_periods_produces_charts() {
        let mut st = state();
        st.select_group("By State");
        st.toggle_subgroup("California");
        assert!(!st.view.time_series.has_data());

        st.select_all_time_periods();
        assert!(st.view.time_series.has_data());
        assert!(st.view.bar.has_data());
        assert_eq!(st.view.row_count, 2);
    }

    #[test]
    fn test_group_change_resets_subgroups() {
        let mut st = state();
        st.select_all_subgroups();
        st.select_all_time_periods();
        assert!(st.view.bar.has_data());

        st.select_group("By State");
        assert!(st.selection.subgroups.is_empty());
        assert_eq!(st.subgroup_options, vec!["California", "Texas"]);
        assert_eq!(st.view.row_count, 0);
        assert!(!st.view.bar.has_data());
        // Time periods are shared across groups and survive the switch.
        assert_eq!(st.selection.time_periods.len(), 3);
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let mut st = state();
        st.toggle_time_period("Phase 2");
        assert!(st.selection.time_periods.contains("Phase 2"));
        st.toggle_time_period("Phase 2");
        assert!(st.selection.time_periods.is_empty());
    }

    #[test]
    fn test_select_none_returns_to_placeholders() {
        let mut st = state();
        st.select_all_subgroups();
        st.select_all_time_periods();
        assert!(st.view.time_series.has_data());

        st.select_no_time_periods();
        assert!(!st.view.time_series.has_data());
        st.select_all_time_periods();
        st.select_no_subgroups();
        assert!(!st.view.time_series.has_data());
    }

    #[test]
    fn test_empty_table_has_no_groups() {
        let st = AppState::new(Arc::new(SurveyTable::default()));
        assert!(st.groups.is_empty());
        assert_eq!(st.selection.group, None);
        assert_eq!(st.view, DashboardView::empty());
    }
}
