use std::collections::BTreeMap;

use thiserror::Error;

use crate::data::coerce::to_number;
use crate::data::filter::FilteredView;

// ---------------------------------------------------------------------------
// Placeholder reasons
// ---------------------------------------------------------------------------

/// Why a chart cannot be drawn. The `Display` text is shown in its place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unavailable {
    #[error("No data for the selected filters.")]
    NoRows,

    #[error("Column '{0}' not found.")]
    MissingColumn(String),

    #[error("Column '{0}' has no numeric values for the selected filters.")]
    NoNumericValues(String),

    #[error("No rows have numeric values for both '{x}' and '{y}'.")]
    NoPairs { x: String, y: String },

    #[error("Not enough numeric columns for a correlation matrix (need at least 2, found {0}).")]
    TooFewNumericColumns(usize),
}

pub type ChartResult<T> = Result<T, Unavailable>;

fn require_column(view: &FilteredView<'_>, name: &str) -> ChartResult<usize> {
    view.dataset
        .column_index(name)
        .ok_or_else(|| Unavailable::MissingColumn(name.to_string()))
}

// ---------------------------------------------------------------------------
// Top-N ranking and cumulative totals
// ---------------------------------------------------------------------------

/// One bar / point of a per-title chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleValue {
    pub title: String,
    pub value: f64,
}

/// Per-title maximum of the measure, the `n` largest first.
/// Equal values are ordered by title.
pub fn top_titles(
    view: &FilteredView<'_>,
    title_column: &str,
    measure_column: &str,
    n: usize,
) -> ChartResult<Vec<TitleValue>> {
    if view.is_empty() {
        return Err(Unavailable::NoRows);
    }
    let title_idx = require_column(view, title_column)?;
    let measure_idx = require_column(view, measure_column)?;

    let mut peaks: BTreeMap<String, f64> = BTreeMap::new();
    for row in view.rows() {
        if row[title_idx].is_missing() {
            continue;
        }
        let Some(value) = to_number(&row[measure_idx]) else {
            continue;
        };
        peaks
            .entry(row[title_idx].to_string())
            .and_modify(|peak| *peak = peak.max(value))
            .or_insert(value);
    }
    if peaks.is_empty() {
        return Err(Unavailable::NoNumericValues(measure_column.to_string()));
    }

    // BTreeMap iteration is title-ordered and the sort is stable.
    let mut ranked: Vec<TitleValue> = peaks
        .into_iter()
        .map(|(title, value)| TitleValue { title, value })
        .collect();
    ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
    ranked.truncate(n);
    Ok(ranked)
}

/// Sum of the measure across all rows of each top-`n` title, in ranking order.
pub fn cumulative_by_title(
    view: &FilteredView<'_>,
    title_column: &str,
    measure_column: &str,
    n: usize,
) -> ChartResult<Vec<TitleValue>> {
    let ranking = top_titles(view, title_column, measure_column, n)?;
    let title_idx = require_column(view, title_column)?;
    let measure_idx = require_column(view, measure_column)?;

    let mut sums: BTreeMap<String, f64> = ranking
        .iter()
        .map(|t| (t.title.clone(), 0.0))
        .collect();
    for row in view.rows() {
        if row[title_idx].is_missing() {
            continue;
        }
        if let (Some(sum), Some(value)) = (
            sums.get_mut(&row[title_idx].to_string()),
            to_number(&row[measure_idx]),
        ) {
            *sum += value;
        }
    }

    Ok(ranking
        .into_iter()
        .map(|t| TitleValue {
            value: sums[&t.title],
            title: t.title,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Category distribution
// ---------------------------------------------------------------------------

/// Label used for rows without a category.
pub const MISSING_CATEGORY: &str = "(missing)";

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub label: String,
    pub count: usize,
    /// Share of the view's rows, 0–100.
    pub percent: f64,
}

/// Row count per category, largest first (ties by label).
pub fn category_distribution(view: &FilteredView<'_>) -> ChartResult<Vec<CategoryShare>> {
    if view.is_empty() {
        return Err(Unavailable::NoRows);
    }
    let col = view.dataset.category_column;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for cell in view.column(col) {
        let label = if cell.is_missing() {
            MISSING_CATEGORY.to_string()
        } else {
            cell.to_string()
        };
        *counts.entry(label).or_default() += 1;
    }

    let total = view.len() as f64;
    let mut shares: Vec<CategoryShare> = counts
        .into_iter()
        .map(|(label, count)| CategoryShare {
            label,
            count,
            percent: count as f64 / total * 100.0,
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(shares)
}

// ---------------------------------------------------------------------------
// Paired series (scatter)
// ---------------------------------------------------------------------------

/// Aligned `[x, y]` pairs of two columns, skipping rows where either side
/// is not a number.
pub fn paired_series(
    view: &FilteredView<'_>,
    x_column: &str,
    y_column: &str,
) -> ChartResult<Vec<[f64; 2]>> {
    if view.is_empty() {
        return Err(Unavailable::NoRows);
    }
    let x_idx = require_column(view, x_column)?;
    let y_idx = require_column(view, y_column)?;

    let pairs: Vec<[f64; 2]> = view
        .rows()
        .filter_map(|row| Some([to_number(&row[x_idx])?, to_number(&row[y_idx])?]))
        .collect();
    if pairs.is_empty() {
        return Err(Unavailable::NoPairs {
            x: x_column.to_string(),
            y: y_column.to_string(),
        });
    }
    Ok(pairs)
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Pearson correlations between every pair of numeric columns.
/// `values[i][j]` is `None` where the coefficient is undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.columns.len()
    }
}

/// Correlate all numeric columns using pairwise-complete rows.
pub fn correlation_matrix(view: &FilteredView<'_>) -> ChartResult<CorrelationMatrix> {
    let numeric = view.dataset.numeric_columns();
    if numeric.len() < 2 {
        return Err(Unavailable::TooFewNumericColumns(numeric.len()));
    }
    if view.is_empty() {
        return Err(Unavailable::NoRows);
    }

    let series: Vec<Vec<Option<f64>>> = numeric
        .iter()
        .map(|&col| view.column(col).map(to_number).collect())
        .collect();

    let k = numeric.len();
    let mut values = vec![vec![None; k]; k];
    for i in 0..k {
        values[i][i] = Some(1.0);
        for j in (i + 1)..k {
            let r = pearson(&series[i], &series[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: numeric
            .iter()
            .map(|&c| view.dataset.columns[c].name.clone())
            .collect(),
        values,
    })
}

/// Pearson's r over positions where both series have a value.
fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}
