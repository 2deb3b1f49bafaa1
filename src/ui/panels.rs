use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_extras::DatePickerButton;

use crate::data::filter::CategoryFilter;
use crate::state::{AppState, Tab};
use crate::theme::Theme;
use crate::ui::table::format_thousands;

// ---------------------------------------------------------------------------
// Left side panel – display and filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel: theme toggle, category selector, week range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Display");
    ui.separator();

    let mut light = state.theme.light;
    if ui.checkbox(&mut light, "🌞 Light mode").changed() {
        state.set_light_mode(light);
    }
    ui.add_space(12.0);

    ui.heading("Filters");
    ui.separator();

    // ---- Category ----
    ui.strong("Category");
    let mut chosen = state.selection.category.clone();
    egui::ComboBox::from_id_salt("category")
        .selected_text(chosen.label().to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut chosen, CategoryFilter::All, "All");
            for category in &state.categories {
                ui.selectable_value(
                    &mut chosen,
                    CategoryFilter::Only(category.clone()),
                    category.as_str(),
                );
            }
        });
    state.set_category(chosen);
    ui.add_space(8.0);

    // ---- Week range ----
    ui.strong("Week range");
    let Some(range) = state.selection.range else {
        ui.label(RichText::new("No parseable weeks in the dataset.").color(state.theme.muted));
        return;
    };
    let (mut start, mut end) = (range.start, range.end);
    let mut changed = false;
    egui::Grid::new("week_range").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("From");
        changed |= ui
            .add(DatePickerButton::new(&mut start).id_salt("week_start").calendar_week(false))
            .changed();
        ui.end_row();
        ui.label("To");
        changed |= ui
            .add(DatePickerButton::new(&mut end).id_salt("week_end").calendar_week(false))
            .changed();
        ui.end_row();
    });
    if changed {
        state.set_range(start, end);
    }

    if let Some((lo, hi)) = state.dataset.week_bounds() {
        ui.label(RichText::new(format!("Available: {lo} → {hi}")).small().color(state.theme.muted));
    }
    if ui.small_button("Reset filters").clicked() {
        state.set_category(CategoryFilter::All);
        if let Some((lo, hi)) = state.dataset.week_bounds() {
            state.set_range(lo, hi);
        }
    }
}

// ---------------------------------------------------------------------------
// Header bar
// ---------------------------------------------------------------------------

/// Title, subtitle and the active-filter chip.
pub fn header(ui: &mut Ui, state: &AppState) {
    let theme = &state.theme;
    ui.add_space(6.0);
    ui.label(
        RichText::new("🎬 Netflix Top 10 Dashboard")
            .size(24.0)
            .strong()
            .color(theme.text),
    );
    ui.label(
        RichText::new("Title performance by weekly hours viewed in the global Top 10")
            .color(theme.muted),
    );
    ui.add_space(4.0);
    ui.horizontal(|ui: &mut Ui| {
        egui::Frame::group(ui.style())
            .fill(theme.chip)
            .stroke(Stroke::new(1.0, theme.stroke))
            .show(ui, |ui: &mut Ui| {
                ui.label(
                    RichText::new(format!("🔎 Active filter: {}", state.view.caption))
                        .color(theme.text),
                );
            });
        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                theme.muted
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
    ui.add_space(6.0);
}

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

pub fn metric_cards(ui: &mut Ui, state: &AppState) {
    let m = &state.view.metrics;
    let cards = [
        ("Rows", format_thousands(m.rows as f64)),
        ("Total hours viewed", format_thousands(m.total)),
        ("Peak weekly hours", format_thousands(m.peak)),
        ("Mean weekly hours", format_thousands(m.mean)),
    ];
    ui.columns(cards.len(), |cols| {
        for (ui, (label, value)) in cols.iter_mut().zip(cards) {
            metric_card(ui, &state.theme, label, &value);
        }
    });
}

fn metric_card(ui: &mut Ui, theme: &Theme, label: &str, value: &str) {
    egui::Frame::group(ui.style())
        .fill(theme.panel_strong)
        .stroke(Stroke::new(1.0, theme.stroke))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(label).color(theme.muted));
            ui.label(RichText::new(value).size(26.0).strong().color(theme.text));
        });
}

// ---------------------------------------------------------------------------
// Tabs and footer
// ---------------------------------------------------------------------------

pub fn tab_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.tab, Tab::Charts, RichText::new("📊 Charts").size(16.0));
        ui.selectable_value(&mut state.tab, Tab::Data, RichText::new("📄 Data").size(16.0));
    });
    ui.separator();
}

pub fn footer(ui: &mut Ui, theme: &Theme) {
    ui.label(
        RichText::new(
            "Note: the dataset has been cleaned and its columns standardised for analysis.",
        )
        .small()
        .color(theme.muted),
    );
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered rows")
        .set_file_name(state.config.export_file_name.as_str())
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_to(&path);
    }
}
