use eframe::egui::{Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::config::DashboardConfig;
use crate::data::coerce::to_number;
use crate::data::model::CellValue;
use crate::state::AppState;
use crate::ui::panels::export_file_dialog;

// ---------------------------------------------------------------------------
// Data tab – export button, caption, filtered table
// ---------------------------------------------------------------------------

pub fn data_tab(ui: &mut Ui, state: &mut AppState) {
    ui.heading("📄 Filtered data");
    ui.add_space(4.0);

    ui.horizontal(|ui: &mut Ui| {
        if ui.button("⬇ Export CSV (filtered)").clicked() {
            export_file_dialog(state);
        }
        let range = match state.selection.range {
            Some(r) => format!("{} to {}", r.start, r.end),
            None => "all weeks".to_string(),
        };
        ui.label(
            RichText::new(format!(
                "Showing {} rows • Category: {} • Range: {range}",
                format_thousands(state.view.rows.len() as f64),
                state.selection.category.label(),
            ))
            .color(state.theme.muted),
        );
    });
    ui.add_space(6.0);

    let dataset = &state.dataset;
    let rows = &state.view.rows;
    let config = &state.config;
    let n_cols = dataset.columns.len();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(70.0).clip(true), n_cols)
        .max_scroll_height(520.0)
        .header(22.0, |mut header| {
            for column in &dataset.columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(&column.name);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let cells = &dataset.rows[rows[row.index()]];
                for (column, cell) in dataset.columns.iter().zip(cells) {
                    row.col(|ui: &mut Ui| {
                        ui.label(format_cell(cell, &column.name, config));
                    });
                }
            });
        });
}

/// Table text for one cell: the measure and runtime columns get
/// thousands separators and no decimals, missing cells are blank.
pub fn format_cell(cell: &CellValue, column: &str, config: &DashboardConfig) -> String {
    if column == config.measure_column || column == config.runtime_column {
        return to_number(cell).map(format_thousands).unwrap_or_default();
    }
    cell.to_string()
}

/// `1234567.8` → `"1,234,568"`.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0.0 {
        out.insert(0, '-');
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(1234567.8), "1,234,568");
        assert_eq!(format_thousands(-45210.0), "-45,210");
        assert_eq!(format_thousands(-0.2), "0");
    }

    #[test]
    fn formats_cells_per_column() {
        let config = DashboardConfig::default();
        assert_eq!(
            format_cell(&CellValue::Float(12345.6), "weekly_hours_viewed", &config),
            "12,346"
        );
        assert_eq!(format_cell(&CellValue::Integer(90), "runtime", &config), "90");
        assert_eq!(format_cell(&CellValue::Text("oops".into()), "runtime", &config), "");
        assert_eq!(format_cell(&CellValue::Float(1.25), "weekly_views", &config), "1.25");
        let d = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert_eq!(format_cell(&CellValue::Date(d), "week", &config), "2024-01-08");
        assert_eq!(format_cell(&CellValue::Missing, "title", &config), "");
    }
}
