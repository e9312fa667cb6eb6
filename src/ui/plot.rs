use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, Points};

use crate::chart::{ChartKind, ChartSpec, Series, Slot};
use crate::color::{ColorMap, FALLBACK_COLOR};

const PLOT_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Chart slots (central panel)
// ---------------------------------------------------------------------------

/// Render one chart slot: the chart itself, or its "no data" notice.
pub fn chart_slot(ui: &mut Ui, id: &str, slot: &Slot, colors: &ColorMap) {
    match slot {
        Slot::Chart(spec) => chart(ui, id, spec, colors),
        Slot::NoData(message) => {
            ui.group(|ui: &mut Ui| {
                ui.set_min_width(ui.available_width());
                ui.label(RichText::new(*message).italics());
            });
        }
    }
}

fn chart(ui: &mut Ui, id: &str, spec: &ChartSpec, colors: &ColorMap) {
    ui.strong(&spec.title);

    let categories = spec.categories.clone();
    Plot::new(id)
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label(spec.x_label.as_str())
        .y_axis_label(spec.y_label.as_str())
        .x_axis_formatter(move |mark, _range| category_label(&categories, mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| match spec.kind {
            ChartKind::Line { markers } => {
                for series in &spec.series {
                    let color = colors.color_for(&series.name);
                    plot_ui.line(
                        Line::new(series_points(spec, series))
                            .name(&series.name)
                            .color(color)
                            .width(2.0),
                    );
                    if markers {
                        plot_ui.points(
                            Points::new(series_points(spec, series))
                                .name(&series.name)
                                .color(color)
                                .radius(3.5),
                        );
                    }
                }
            }
            ChartKind::Bar => {
                for series in &spec.series {
                    let bars = series
                        .points
                        .iter()
                        .filter_map(|p| {
                            let x = spec.category_index(&p.category)? as f64;
                            Some(
                                Bar::new(x, p.value)
                                    .name(&p.category)
                                    .fill(FALLBACK_COLOR),
                            )
                        })
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).name(&series.name).width(0.6));
                }
            }
        });
}

/// Map a series onto the plot's numeric x axis (category index).
fn series_points(spec: &ChartSpec, series: &Series) -> Vec<[f64; 2]> {
    series
        .points
        .iter()
        .filter_map(|p| Some([spec.category_index(&p.category)? as f64, p.value]))
        .collect()
}

/// Tick label for position `x`: the category name on whole indices, blank elsewhere.
fn category_label(categories: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    categories
        .get(rounded as usize)
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_on_whole_indices_only() {
        let cats = vec!["Phase 1".to_string(), "Phase 2".to_string()];
        assert_eq!(category_label(&cats, 0.0), "Phase 1");
        assert_eq!(category_label(&cats, 1.0), "Phase 2");
        assert_eq!(category_label(&cats, 0.5), "");
        assert_eq!(category_label(&cats, 2.0), "");
        assert_eq!(category_label(&cats, -1.0), "");
    }
}
