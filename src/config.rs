use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Fixed settings for one dashboard session. Built once in `main` and
/// passed by reference to the loader, the render pass and the UI.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// CSV file loaded at start-up, relative to the working directory.
    pub data_path: PathBuf,
    pub title_column: String,
    /// Used as the title column when `title_column` is absent.
    pub title_alias: String,
    pub category_column: String,
    pub week_column: String,
    /// Weekly numeric measure driving rankings and metrics.
    pub measure_column: String,
    pub runtime_column: String,
    /// Number of titles in the ranking and cumulative charts.
    pub top_n: usize,
    /// Default file name offered by the export dialog.
    pub export_file_name: String,
    /// Start in light mode.
    pub light_mode: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("netflix_cleaned_sample.csv"),
            title_column: "title".into(),
            title_alias: "show_title".into(),
            category_column: "category".into(),
            week_column: "week".into(),
            measure_column: "weekly_hours_viewed".into(),
            runtime_column: "runtime".into(),
            top_n: 10,
            export_file_name: "netflix_top10_filtered.csv".into(),
            light_mode: false,
        }
    }
}
