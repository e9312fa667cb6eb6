use std::collections::BTreeSet;

use crate::data::aggregate::{aggregate_mean_by_subgroup, AggregateRow};
use crate::data::filter::{filter, FilteredView, Selection};
use crate::data::model::SurveyTable;

pub const TIME_SERIES_TITLE: &str = "Adults Receiving Mental Health Care (Past 4 Weeks)";
pub const BAR_TITLE: &str = "Average Mental Health Care Access by Subgroup";

pub const TIME_SERIES_PLACEHOLDER: &str = "No data to display with current filters.";
pub const BAR_PLACEHOLDER: &str = "Bar chart unavailable with current filters.";

// ---------------------------------------------------------------------------
// ChartSpec – renderer-agnostic chart description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line { markers: bool },
    Bar,
}

/// One y value at a position on the categorical x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub category: String,
    pub value: f64,
}

/// A named series; for line charts, one line.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

/// Everything a renderer needs to draw one chart.
///
/// The x axis is categorical: `categories` fixes the order of its ticks and
/// every point's `category` is one of them.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// Position of `category` on the x axis.
    pub fn category_index(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }
}

/// Line chart of Value over time, one line per subgroup.
///
/// Rows without a Value are left out of their line.
pub fn to_time_series(view: &FilteredView<'_>) -> ChartSpec {
    let categories: Vec<String> = view
        .records()
        .iter()
        .filter_map(|r| r.time_period.clone())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();

    let mut series: Vec<Series> = Vec::new();
    for record in view.records() {
        let (Some(subgroup), Some(period), Some(value)) =
            (&record.subgroup, &record.time_period, record.value)
        else {
            continue;
        };
        let point = ChartPoint {
            category: period.clone(),
            value,
        };
        match series.iter_mut().find(|s| &s.name == subgroup) {
            Some(s) => s.points.push(point),
            None => series.push(Series {
                name: subgroup.clone(),
                points: vec![point],
            }),
        }
    }

    // Lines are drawn left to right along the category axis.
    for s in &mut series {
        s.points.sort_by_key(|p| categories.binary_search(&p.category).unwrap_or(usize::MAX));
    }

    ChartSpec {
        kind: ChartKind::Line { markers: true },
        title: TIME_SERIES_TITLE.to_string(),
        x_label: "Time Period".to_string(),
        y_label: "% Receiving Care".to_string(),
        categories,
        series,
    }
}

/// Bar chart with one bar per aggregate row, in row order.
pub fn to_bar_spec(rows: &[AggregateRow]) -> ChartSpec {
    let y_label = "Average % Receiving Care".to_string();
    ChartSpec {
        kind: ChartKind::Bar,
        title: BAR_TITLE.to_string(),
        x_label: "Subgroup".to_string(),
        y_label: y_label.clone(),
        categories: rows.iter().map(|r| r.subgroup.clone()).collect(),
        series: vec![Series {
            name: y_label,
            points: rows
                .iter()
                .map(|r| ChartPoint {
                    category: r.subgroup.clone(),
                    value: r.mean_value,
                })
                .collect(),
        }],
    }
}

// ---------------------------------------------------------------------------
// Render slots
// ---------------------------------------------------------------------------

/// Contents of one chart area: a chart, or an explanation of why there is none.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Chart(ChartSpec),
    NoData(&'static str),
}

impl Slot {
    pub fn has_data(&self) -> bool {
        matches!(self, Slot::Chart(_))
    }
}

/// Result of one full pipeline run: filter → aggregate → present.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub time_series: Slot,
    pub bar: Slot,
    /// Rows that passed the filter.
    pub row_count: usize,
}

impl DashboardView {
    /// The view for a selection that matches nothing.
    pub fn empty() -> Self {
        DashboardView {
            time_series: Slot::NoData(TIME_SERIES_PLACEHOLDER),
            bar: Slot::NoData(BAR_PLACEHOLDER),
            row_count: 0,
        }
    }

    /// Run the whole pipeline for `selection`. Never fails.
    pub fn compute(table: &SurveyTable, selection: &Selection) -> Self {
        let view = filter(table, selection);
        log::debug!(
            "Filtered {} of {} rows (group {:?}, {} subgroups, {} time periods)",
            view.len(),
            table.len(),
            selection.group,
            selection.subgroups.len(),
            selection.time_periods.len()
        );
        if view.is_empty() {
            return Self::empty();
        }

        let time_series = Slot::Chart(to_time_series(&view));
        let rows = aggregate_mean_by_subgroup(&view);
        let bar = if rows.is_empty() {
            Slot::NoData(BAR_PLACEHOLDER)
        } else {
            Slot::Chart(to_bar_spec(&rows))
        };

        DashboardView {
            time_series,
            bar,
            row_count: view.len(),
        }
    }
}
