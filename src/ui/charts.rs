use std::f64::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, FontId, RichText, Sense, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::state::AppState;
use crate::stats::charts::{CategoryShare, ChartResult, CorrelationMatrix, TitleValue, Unavailable};
use crate::theme::{contrast_text, diverging, ColorMap, Theme, SERIES};
use crate::ui::table::format_thousands;

const CHART_HEIGHT: f32 = 280.0;
const DONUT_OUTER: f64 = 1.0;
const DONUT_INNER: f64 = 0.66;

// ---------------------------------------------------------------------------
// Charts tab
// ---------------------------------------------------------------------------

/// Render the five chart sections, two per row plus the heatmap.
pub fn charts_tab(ui: &mut Ui, state: &AppState) {
    let theme = &state.theme;
    let view = &state.view;

    ui.heading("📊 Main charts");
    ui.add_space(4.0);

    ui.columns(2, |cols| {
        section(&mut cols[0], theme, "Top 10 titles (highest weekly hours viewed)", |ui| {
            with_chart(ui, theme, &view.top_titles, |ui, data| top_titles_chart(ui, data));
        });
        section(&mut cols[1], theme, "Total hours viewed per title (cumulative, top 10)", |ui| {
            with_chart(ui, theme, &view.cumulative, |ui, data| cumulative_chart(ui, data));
        });
    });
    ui.add_space(8.0);

    ui.columns(2, |cols| {
        section(&mut cols[0], theme, "Category distribution", |ui| {
            with_chart(ui, theme, &view.categories, |ui, data| {
                donut_chart(ui, theme, &state.category_colors, data)
            });
        });
        section(&mut cols[1], theme, "Runtime vs weekly hours viewed", |ui| {
            with_chart(ui, theme, &view.runtime_vs_measure, |ui, data| {
                scatter_chart(ui, theme, data)
            });
        });
    });
    ui.add_space(8.0);

    section(ui, theme, "🔥 Correlation matrix (numeric columns)", |ui| {
        with_chart(ui, theme, &view.correlation, |ui, data| heatmap(ui, theme, data));
    });
}

/// Panel frame with a title.
fn section(ui: &mut Ui, theme: &Theme, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::group(ui.style())
        .fill(theme.panel)
        .stroke(Stroke::new(1.0, theme.stroke))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).size(16.0).strong().color(theme.text));
            ui.add_space(4.0);
            add_contents(ui);
        });
}

/// Draw the chart, or its placeholder when the data is unavailable.
fn with_chart<T>(
    ui: &mut Ui,
    theme: &Theme,
    result: &ChartResult<T>,
    draw: impl FnOnce(&mut Ui, &T),
) {
    match result {
        Ok(data) => draw(ui, data),
        Err(reason) => placeholder(ui, theme, reason),
    }
}

fn placeholder(ui: &mut Ui, theme: &Theme, reason: &Unavailable) {
    egui::Frame::group(ui.style())
        .fill(theme.chip)
        .stroke(Stroke::new(1.0, theme.stroke))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(format!("ℹ {reason}")).color(theme.text));
        });
}

// ---------------------------------------------------------------------------
// Per-title charts (bar, cumulative line)
// ---------------------------------------------------------------------------

fn short_label(title: &str) -> String {
    const MAX: usize = 14;
    if title.chars().count() <= MAX {
        title.to_string()
    } else {
        let head: String = title.chars().take(MAX - 1).collect();
        format!("{head}…")
    }
}

/// Labels integer grid marks with the matching title, nothing in between.
fn title_formatter(titles: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        titles
            .get(idx as usize)
            .map(|t| short_label(t))
            .unwrap_or_default()
    }
}

fn hover_label(name: &str, value: &PlotPoint) -> String {
    if name.is_empty() {
        format_thousands(value.y)
    } else {
        format!("{name}\n{}", format_thousands(value.y))
    }
}

fn top_titles_chart(ui: &mut Ui, data: &[TitleValue]) {
    let titles: Vec<String> = data.iter().map(|t| t.title.clone()).collect();
    let bars: Vec<Bar> = data
        .iter()
        .enumerate()
        .map(|(i, t)| {
            Bar::new(i as f64, t.value)
                .name(&t.title)
                .fill(SERIES[0])
                .width(0.7)
        })
        .collect();

    Plot::new("top_titles")
        .height(CHART_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_background(false)
        .include_y(0.0)
        .x_axis_label("Title")
        .y_axis_label("Weekly hours viewed (max)")
        .x_axis_formatter(title_formatter(titles))
        .y_axis_formatter(|mark: GridMark, _range| format_thousands(mark.value))
        .label_formatter(hover_label)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(SERIES[0]));
        });
}

fn cumulative_chart(ui: &mut Ui, data: &[TitleValue]) {
    let titles: Vec<String> = data.iter().map(|t| t.title.clone()).collect();
    let points: Vec<[f64; 2]> = data
        .iter()
        .enumerate()
        .map(|(i, t)| [i as f64, t.value])
        .collect();

    Plot::new("cumulative")
        .height(CHART_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_background(false)
        .include_y(0.0)
        .x_axis_label("Title")
        .y_axis_label("Total hours viewed")
        .x_axis_formatter(title_formatter(titles))
        .y_axis_formatter(|mark: GridMark, _range| format_thousands(mark.value))
        .label_formatter(hover_label)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::new(points.clone()))
                    .color(SERIES[0])
                    .width(2.2)
                    .fill(0.0),
            );
            plot_ui.points(Points::new(PlotPoints::new(points)).radius(4.0).color(SERIES[0]));
        });
}

// ---------------------------------------------------------------------------
// Donut
// ---------------------------------------------------------------------------

/// Ring slices start at 12 o'clock and run counter-clockwise.
fn donut_chart(ui: &mut Ui, theme: &Theme, colors: &ColorMap, data: &[CategoryShare]) {
    Plot::new("category_donut")
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_background(false)
        .include_x(-1.6)
        .include_x(1.6)
        .include_y(-1.15)
        .include_y(1.15)
        .show(ui, |plot_ui| {
            let mut start = FRAC_PI_2;
            for share in data {
                let sweep = share.percent / 100.0 * TAU;
                let color = colors.color_for(&share.label);
                for quad in ring_segments(start, sweep) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(quad))
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color)),
                    );
                }

                let mid = start + sweep / 2.0;
                let r = (DONUT_OUTER + DONUT_INNER) / 2.0;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(r * mid.cos(), r * mid.sin()),
                        RichText::new(format!("{:.1}%", share.percent)).strong(),
                    )
                    .color(contrast_text(color)),
                );
                let r = DONUT_OUTER + 0.18;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(r * mid.cos(), r * mid.sin()),
                        RichText::new(&share.label),
                    )
                    .color(theme.text),
                );
                start += sweep;
            }
        });
}

/// Split one ring slice into convex quads so each can be filled directly.
fn ring_segments(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    let steps = ((sweep / TAU) * 120.0).ceil().max(1.0) as usize;
    let step = sweep / steps as f64;
    (0..steps)
        .map(|i| {
            let a0 = start + step * i as f64;
            let a1 = a0 + step;
            vec![
                [DONUT_INNER * a0.cos(), DONUT_INNER * a0.sin()],
                [DONUT_OUTER * a0.cos(), DONUT_OUTER * a0.sin()],
                [DONUT_OUTER * a1.cos(), DONUT_OUTER * a1.sin()],
                [DONUT_INNER * a1.cos(), DONUT_INNER * a1.sin()],
            ]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

fn scatter_chart(ui: &mut Ui, theme: &Theme, data: &[[f64; 2]]) {
    Plot::new("runtime_scatter")
        .height(CHART_HEIGHT)
        .x_axis_label("Runtime (minutes)")
        .y_axis_label("Weekly hours viewed")
        .y_axis_formatter(|mark: GridMark, _range| format_thousands(mark.value))
        .show_background(false)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::new(data.to_vec()))
                    .radius(3.5)
                    .filled(true)
                    .color(theme.accent.gamma_multiply(0.35)),
            );
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

const CELL_W: f32 = 72.0;
const CELL_H: f32 = 30.0;
const LABEL_W: f32 = 150.0;

/// Annotated grid painted directly; undefined coefficients stay blank.
fn heatmap(ui: &mut Ui, theme: &Theme, matrix: &CorrelationMatrix) {
    let n = matrix.size();
    let size = egui::vec2(LABEL_W + CELL_W * n as f32, CELL_H * (n as f32 + 1.0) + 8.0);
    egui::ScrollArea::horizontal()
        .id_salt("heatmap_scroll")
        .show(ui, |ui: &mut Ui| {
            let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
            let painter = ui.painter_at(rect);
            let font = FontId::proportional(12.0);
            let origin = rect.min;

            for (i, name) in matrix.columns.iter().enumerate() {
                let y = origin.y + CELL_H * i as f32;
                painter.text(
                    egui::pos2(origin.x + LABEL_W - 8.0, y + CELL_H / 2.0),
                    Align2::RIGHT_CENTER,
                    short_label(name),
                    font.clone(),
                    theme.text,
                );

                for (j, value) in matrix.values[i].iter().enumerate() {
                    let cell = egui::Rect::from_min_size(
                        egui::pos2(origin.x + LABEL_W + CELL_W * j as f32, y),
                        egui::vec2(CELL_W - 2.0, CELL_H - 2.0),
                    );
                    match value {
                        Some(r) => {
                            let fill = diverging(*r);
                            painter.rect_filled(cell, 2.0, fill);
                            painter.text(
                                cell.center(),
                                Align2::CENTER_CENTER,
                                format!("{r:.2}"),
                                font.clone(),
                                contrast_text(fill),
                            );
                        }
                        None => {
                            painter.rect_filled(cell, 2.0, theme.panel);
                        }
                    }
                }
            }

            let label_y = origin.y + CELL_H * n as f32 + CELL_H / 2.0;
            for (j, name) in matrix.columns.iter().enumerate() {
                painter.text(
                    egui::pos2(origin.x + LABEL_W + CELL_W * j as f32 + CELL_W / 2.0, label_y),
                    Align2::CENTER_CENTER,
                    short_label(name),
                    font.clone(),
                    theme.text,
                );
            }
        });
}
