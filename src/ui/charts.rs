use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoint, PlotPoints, Points,
    Polygon, Text,
};

use crate::charts::{
    BarSpec, BoxSpec, GradientScatterSpec, HeatmapSpec, MatrixSpec, ScatterSpec,
    MATRIX_DIMENSIONS,
};
use crate::color;
use crate::data::model::Smoker;

const CHART_HEIGHT: f32 = 320.0;

fn smoker_label(smoker: Smoker) -> &'static str {
    match smoker {
        Smoker::Yes => "Smokers",
        Smoker::No => "Non-smokers",
    }
}

fn chart_title(ui: &mut Ui, title: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(title).strong());
    });
}

/// Nearest-point lookup so the hover label can carry the region, which the
/// plot items themselves cannot.  Distances are normalised per axis; hovers
/// far from every point return `None`.
fn nearest_region(points: &[(f64, f64, String)], x: f64, y: f64) -> Option<&str> {
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for (px, py, _) in points {
        x_min = x_min.min(*px);
        x_max = x_max.max(*px);
        y_min = y_min.min(*py);
        y_max = y_max.max(*py);
    }
    let sx = (x_max - x_min).max(f64::EPSILON);
    let sy = (y_max - y_min).max(f64::EPSILON);

    let dist = |px: f64, py: f64| {
        let dx = (px - x) / sx;
        let dy = (py - y) / sy;
        dx * dx + dy * dy
    };
    points
        .iter()
        .min_by(|a, b| dist(a.0, a.1).total_cmp(&dist(b.0, b.1)))
        .filter(|p| dist(p.0, p.1) < 0.001)
        .map(|p| p.2.as_str())
}

fn scatter_hover(
    points: Vec<(f64, f64, String)>,
    x_title: &'static str,
    y_title: &'static str,
) -> impl Fn(&str, &PlotPoint) -> String {
    move |name: &str, value: &PlotPoint| {
        let mut label = String::new();
        if !name.is_empty() {
            label.push_str(name);
            label.push('\n');
        }
        label.push_str(&format!(
            "{x_title} = {:.1}\n{y_title} = {:.0}",
            value.x, value.y
        ));
        if let Some(region) = nearest_region(&points, value.x, value.y) {
            label.push_str(&format!("\nregion = {region}"));
        }
        label
    }
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Color-coded correlation grid with the value printed in each cell.
/// Row 0 sits at the bottom, column labels run along the lower edge.
pub fn heatmap(ui: &mut Ui, spec: Option<&HeatmapSpec>) {
    chart_title(ui, "Correlation Between Variables");

    let Some(spec) = spec else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No numeric data available");
        });
        return;
    };

    let n = spec.size();
    Plot::new("correlation_heatmap")
        .height(CHART_HEIGHT)
        .show_axes([false, false])
        .show_grid(false)
        .data_aspect(1.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .include_x(-1.6)
        .include_y(-0.8)
        .show(ui, |plot_ui| {
            for row in 0..n {
                for col in 0..n {
                    let r = spec.value(row, col);
                    let (fill, label) = if r.is_nan() {
                        (Color32::from_gray(60), "–".to_string())
                    } else {
                        (color::diverging(r), format!("{r:.2}"))
                    };

                    let (x0, y0) = (col as f64, row as f64);
                    let corners = vec![
                        [x0, y0],
                        [x0 + 1.0, y0],
                        [x0 + 1.0, y0 + 1.0],
                        [x0, y0 + 1.0],
                    ];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(corners))
                            .fill_color(fill)
                            .stroke(Stroke::new(1.0, Color32::from_gray(30))),
                    );
                    plot_ui.text(Text::new(
                        PlotPoint::new(x0 + 0.5, y0 + 0.5),
                        RichText::new(label).color(color::contrast_text(fill)),
                    ));
                }
            }

            // Axis labels drawn as plot text so the grid stays square.
            for (i, label) in spec.labels.iter().enumerate() {
                plot_ui.text(Text::new(
                    PlotPoint::new(i as f64 + 0.5, -0.4),
                    RichText::new(label.clone()).small(),
                ));
                plot_ui.text(Text::new(
                    PlotPoint::new(-0.8, i as f64 + 0.5),
                    RichText::new(label.clone()).small(),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Age / charges scatter (size = BMI, color = smoker)
// ---------------------------------------------------------------------------

pub fn age_scatter(ui: &mut Ui, spec: &ScatterSpec) {
    chart_title(ui, "Insurance Cost by Age, BMI, and Smoking Status");

    let hover_points: Vec<(f64, f64, String)> = spec
        .points
        .iter()
        .map(|p| (p.x, p.y, p.region.clone()))
        .collect();

    Plot::new("age_scatter")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Age")
        .y_axis_label("Costs")
        .label_formatter(scatter_hover(hover_points, "age", "cost"))
        .show(ui, |plot_ui| {
            for point in &spec.points {
                let radius = 2.0 + 5.0 * spec.size_t(point.size) as f32;
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![[point.x, point.y]]))
                        .radius(radius)
                        .color(color::smoker_color(point.smoker))
                        .name(smoker_label(point.smoker)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Smoker vs non-smoker mean charges
// ---------------------------------------------------------------------------

pub fn smoker_bars(ui: &mut Ui, spec: &BarSpec) {
    chart_title(ui, "Average Insurance Cost: Smokers vs Non-Smokers");

    if spec.bars.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No charge data available");
        });
        return;
    }

    Plot::new("smoker_bars")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label("Average Cost")
        .show_axes([false, true])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for (i, (smoker, mean)) in spec.bars.iter().enumerate() {
                let bar = Bar::new(i as f64, *mean)
                    .width(0.7)
                    .fill(color::smoker_color(*smoker))
                    .name(smoker_label(*smoker));
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(smoker_label(*smoker)));
            }
        });
}

// ---------------------------------------------------------------------------
// Region box plot
// ---------------------------------------------------------------------------

pub fn region_box(ui: &mut Ui, spec: &BoxSpec) {
    let title = match &spec.region {
        Some(region) => format!("Insurance Cost by Smoking Status ({region})"),
        None => "Insurance Cost by Smoking Status".to_string(),
    };
    chart_title(ui, &title);

    // An empty selection or region renders an empty plot, never an error.
    Plot::new("region_box")
        .height(CHART_HEIGHT - 24.0)
        .legend(Legend::default())
        .y_axis_label("Costs")
        .show_axes([false, true])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for (i, group) in spec.groups.iter().enumerate() {
                let c = color::smoker_color(group.smoker);
                let s = &group.summary;
                let elem = BoxElem::new(
                    i as f64,
                    BoxSpread::new(s.min, s.q1, s.median, s.q3, s.max),
                )
                .box_width(0.5)
                .fill(c.gamma_multiply(0.4))
                .stroke(Stroke::new(1.5, c))
                .name(smoker_label(group.smoker));
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(smoker_label(group.smoker)));
            }
        });
}

// ---------------------------------------------------------------------------
// BMI / charges scatter (continuous age scale)
// ---------------------------------------------------------------------------

pub fn bmi_scatter(ui: &mut Ui, spec: &GradientScatterSpec) {
    chart_title(ui, "Cost by BMI and Age");

    let hover_points: Vec<(f64, f64, String)> = spec
        .points
        .iter()
        .map(|p| (p.x, p.y, p.region.clone()))
        .collect();

    Plot::new("bmi_scatter")
        .height(CHART_HEIGHT)
        .x_axis_label("BMI")
        .y_axis_label("Costs")
        .label_formatter(scatter_hover(hover_points, "bmi", "cost"))
        .show(ui, |plot_ui| {
            for point in &spec.points {
                let t = spec.value_t(point.value);
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![[point.x, point.y]]))
                        .radius(2.0 + 4.0 * t as f32)
                        .color(color::sequential(t)),
                );
            }
        });

    // Continuous-scale legend: the age range at the gradient's ends.
    if !spec.points.is_empty() {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new("Age").small());
            ui.label(
                RichText::new(format!("{:.0}", spec.value_min))
                    .small()
                    .color(color::sequential(0.0)),
            );
            ui.label(RichText::new("→").small());
            ui.label(
                RichText::new(format!("{:.0}", spec.value_max))
                    .small()
                    .color(color::sequential(1.0)),
            );
        });
    }
}

// ---------------------------------------------------------------------------
// High-cost profile scatter matrix
// ---------------------------------------------------------------------------

/// Pairwise scatter matrix over {age, bmi, children, charges} for the rows
/// above the high-cost threshold, colored by smoker status.
pub fn scatter_matrix(ui: &mut Ui, spec: &MatrixSpec) {
    let title = match spec.threshold {
        Some(t) => format!("Profile of Beneficiaries with Highest Costs (charges > {t:.0})"),
        None => "Profile of Beneficiaries with Highest Costs".to_string(),
    };
    chart_title(ui, &title);

    let n = MATRIX_DIMENSIONS.len();
    let cell = ((ui.available_width() - 40.0) / n as f32).clamp(120.0, 260.0);

    eframe::egui::Grid::new("high_cost_matrix")
        .spacing([6.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            for row in 0..n {
                for col in 0..n {
                    if row == col {
                        ui.allocate_ui([cell, cell].into(), |ui: &mut Ui| {
                            ui.centered_and_justified(|ui: &mut Ui| {
                                ui.label(RichText::new(MATRIX_DIMENSIONS[row]).strong());
                            });
                        });
                    } else {
                        matrix_pane(ui, spec, row, col, cell);
                    }
                }
                ui.end_row();
            }
        });
}

fn matrix_pane(ui: &mut Ui, spec: &MatrixSpec, row: usize, col: usize, cell: f32) {
    // One Points item per smoker group keeps the pane cheap to draw.
    let mut smokers: Vec<[f64; 2]> = Vec::new();
    let mut non_smokers: Vec<[f64; 2]> = Vec::new();
    for r in &spec.rows {
        let (Some(x), Some(y)) = (r.values[col], r.values[row]) else {
            continue;
        };
        match r.smoker {
            Smoker::Yes => smokers.push([x, y]),
            Smoker::No => non_smokers.push([x, y]),
        }
    }

    Plot::new(format!("matrix_{row}_{col}"))
        .width(cell)
        .height(cell)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            if !non_smokers.is_empty() {
                plot_ui.points(
                    Points::new(PlotPoints::from(non_smokers))
                        .radius(1.5)
                        .color(color::NON_SMOKER_GREEN),
                );
            }
            if !smokers.is_empty() {
                plot_ui.points(
                    Points::new(PlotPoints::from(smokers))
                        .radius(1.5)
                        .color(color::SMOKER_RED),
                );
            }
        });
}
