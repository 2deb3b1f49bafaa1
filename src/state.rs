use std::path::Path;

use chrono::NaiveDate;

use crate::config::DashboardConfig;
use crate::dashboard::{render, DashboardView};
use crate::data::filter::{CategoryFilter, FilterSelection, FilteredView};
use crate::data::model::Dataset;
use crate::export;
use crate::stats::charts::MISSING_CATEGORY;
use crate::theme::{ColorMap, Theme};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Charts,
    Data,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded once at start-up, never modified.
    pub dataset: Dataset,

    /// Distinct sorted categories offered by the selector.
    pub categories: Vec<String>,

    /// Current filter inputs.
    pub selection: FilterSelection,

    /// Output of the latest render pass.
    pub view: DashboardView,

    pub theme: Theme,

    /// Donut slice colours, fixed for the session.
    pub category_colors: ColorMap,

    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest the loaded dataset with everything selected.
    pub fn new(dataset: Dataset, config: DashboardConfig) -> Self {
        let categories = dataset.categories();
        let mut labels = categories.clone();
        labels.push(MISSING_CATEGORY.to_string());

        let selection = FilterSelection::full(&dataset);
        let view = render(&dataset, &selection, &config);
        let theme = Theme::for_mode(config.light_mode);

        Self {
            category_colors: ColorMap::new(&labels),
            categories,
            selection,
            view,
            theme,
            dataset,
            config,
            tab: Tab::Charts,
            status_message: None,
        }
    }

    /// Recompute the view after a filter change.
    pub fn refresh(&mut self) {
        self.view = render(&self.dataset, &self.selection, &self.config);
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        if self.selection.category != category {
            self.selection.category = category;
            self.refresh();
        }
    }

    pub fn set_range(&mut self, start: NaiveDate, end: NaiveDate) {
        let before = self.selection.range;
        self.selection.set_range(&self.dataset, start, end);
        if self.selection.range != before {
            self.refresh();
        }
    }

    pub fn set_light_mode(&mut self, light: bool) {
        self.theme = Theme::for_mode(light);
    }

    /// The rows of the latest render pass.
    pub fn filtered_view(&self) -> FilteredView<'_> {
        FilteredView {
            dataset: &self.dataset,
            indices: self.view.rows.clone(),
        }
    }

    /// Write the current filtered rows to `path`.
    pub fn export_to(&mut self, path: &Path) {
        match export::save_csv(&self.filtered_view(), path) {
            Ok(()) => {
                self.status_message = Some(format!(
                    "Exported {} rows to {}",
                    self.view.rows.len(),
                    path.display()
                ));
            }
            Err(e) => {
                log::error!("Failed to export CSV: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_dataset;

    const CSV: &str = "\
title,category,week,weekly_hours_viewed,runtime
Show A,Movie,2024-01-01,100,90
Show B,Series,2024-01-08,50,45
Show A,Movie,2024-01-08,120,90
";

    fn state() -> AppState {
        let config = DashboardConfig::default();
        let ds = read_dataset(CSV.as_bytes(), &config).unwrap();
        AppState::new(ds, config)
    }

    #[test]
    fn starts_with_everything_selected() {
        let s = state();
        assert_eq!(s.categories, vec!["Movie".to_string(), "Series".to_string()]);
        assert_eq!(s.view.rows, vec![0, 1, 2]);
        assert!(!s.theme.light);
        assert_eq!(s.tab, Tab::Charts);
    }

    #[test]
    fn filter_changes_rerender() {
        let mut s = state();
        s.set_category(CategoryFilter::Only("Series".into()));
        assert_eq!(s.view.rows, vec![1]);
        assert_eq!(s.view.metrics.total, 50.0);

        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        s.set_range(jan1, jan1);
        assert!(s.view.rows.is_empty());
        assert!(s.view.top_titles.is_err());

        s.set_category(CategoryFilter::All);
        assert_eq!(s.view.rows, vec![0]);
    }

    #[test]
    fn export_reflects_current_filter() {
        let mut s = state();
        s.set_category(CategoryFilter::Only("Movie".into()));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        s.export_to(&path);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(s.status_message.unwrap().starts_with("Exported 2 rows"));
    }

    #[test]
    fn export_failure_sets_status() {
        let mut s = state();
        let dir = tempfile::tempdir().unwrap();
        s.export_to(&dir.path().join("missing").join("out.csv"));
        assert!(s.status_message.unwrap().starts_with("Error:"));
    }

    #[test]
    fn theme_toggle() {
        let mut s = state();
        s.set_light_mode(true);
        assert!(s.theme.light);
    }
}
