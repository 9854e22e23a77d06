use eframe::egui::{Color32, Ui};
use egui_plot::{Corner, Legend, Line, MarkerShape, Plot, Points};

use crate::color::ColorMap;
use crate::data::chart::{bubble_radius, max_density, x_upper_bound, BubbleSeries, Series};

const PLOT_HEIGHT: f32 = 360.0;
const X_LABEL: &str = "Current Density (A g-1)";
const Y_LABEL: &str = "Specific Capacity (mAh g-1)";

fn color(color_map: Option<&ColorMap>, label: &str) -> Color32 {
    color_map
        .map(|cm| cm.color_for(label))
        .unwrap_or(Color32::LIGHT_BLUE)
}

fn base_plot(id: &str, x_max: Option<f64>) -> Plot<'_> {
    let mut plot = Plot::new(id)
        .legend(Legend::default().position(Corner::LeftTop))
        .x_axis_label(X_LABEL)
        .y_axis_label(Y_LABEL)
        .height(PLOT_HEIGHT)
        .include_x(0.0)
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true);
    if let Some(x_max) = x_max {
        plot = plot.include_x(x_max);
    }
    plot
}

// ---------------------------------------------------------------------------
// Capacity vs. current density (line + markers)
// ---------------------------------------------------------------------------

/// Overlay one line per series, x axis from 0 to 1.1 × the largest density.
pub fn capacity_plot(ui: &mut Ui, id: &str, series: &[Series], color_map: Option<&ColorMap>) {
    let x_max = x_upper_bound(max_density(series.iter().flat_map(|s| s.points.iter())));

    base_plot(id, x_max).show(ui, |plot_ui| {
        for s in series {
            let c = color(color_map, &s.label);
            plot_ui.line(
                Line::new(s.points.clone())
                    .name(&s.label)
                    .color(c)
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(s.points.clone())
                    .name(&s.label)
                    .color(c)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(3.0),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Cycle-life bubble chart
// ---------------------------------------------------------------------------

/// One bubble per cycle-life point; radius grows with the cycle count.
///
/// `x_max` is the shared axis bound, so both charts line up.
pub fn bubble_plot(
    ui: &mut Ui,
    id: &str,
    series: &[BubbleSeries],
    x_max: Option<f64>,
    color_map: Option<&ColorMap>,
) {
    base_plot(id, x_max).show(ui, |plot_ui| {
        for s in series {
            let c = color(color_map, &s.label).gamma_multiply(0.6);
            for &(point, cycles) in &s.bubbles {
                plot_ui.points(
                    Points::new(vec![point])
                        .name(&s.label)
                        .color(c)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(bubble_radius(cycles)),
                );
            }
        }
    });
}
