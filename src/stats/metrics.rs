use crate::data::coerce::to_number;
use crate::data::filter::FilteredView;

/// Summary numbers shown on the metric cards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Metrics {
    pub rows: usize,
    pub total: f64,
    pub peak: f64,
    pub mean: f64,
}

/// Row count plus sum, max and mean of the measure column.
///
/// Non-numeric cells are dropped. An empty view or an absent column
/// gives all zeros; a column with no numeric cell gives zero aggregates
/// with the row count kept.
pub fn compute(view: &FilteredView<'_>, measure_column: &str) -> Metrics {
    let Some(col) = view.dataset.column_index(measure_column) else {
        return Metrics::default();
    };
    if view.is_empty() {
        return Metrics::default();
    }

    let values: Vec<f64> = view.column(col).filter_map(to_number).collect();
    if values.is_empty() {
        return Metrics {
            rows: view.len(),
            ..Metrics::default()
        };
    }

    let total: f64 = values.iter().sum();
    let peak = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Metrics {
        rows: view.len(),
        total,
        peak,
        mean: total / values.len() as f64,
    }
}
