use crate::config::DashboardConfig;
use crate::data::filter::{apply, FilterSelection};
use crate::data::model::Dataset;
use crate::stats::charts::{
    category_distribution, correlation_matrix, cumulative_by_title, paired_series, top_titles,
    CategoryShare, ChartResult, CorrelationMatrix, TitleValue,
};
use crate::stats::metrics::{self, Metrics};

// ---------------------------------------------------------------------------
// One render pass
// ---------------------------------------------------------------------------

/// Everything the UI draws for the current filter inputs.
#[derive(Debug, Clone)]
pub struct DashboardView {
    /// Active filter chip text.
    pub caption: String,
    /// Dataset row indices passing the filters.
    pub rows: Vec<usize>,
    pub metrics: Metrics,
    pub top_titles: ChartResult<Vec<TitleValue>>,
    pub cumulative: ChartResult<Vec<TitleValue>>,
    pub categories: ChartResult<Vec<CategoryShare>>,
    pub runtime_vs_measure: ChartResult<Vec<[f64; 2]>>,
    pub correlation: ChartResult<CorrelationMatrix>,
}

/// Recompute every derived output from scratch.
pub fn render(dataset: &Dataset, selection: &FilterSelection, config: &DashboardConfig) -> DashboardView {
    let view = apply(dataset, selection);
    log::debug!("Filter '{}' kept {} of {} rows", selection.caption(), view.len(), dataset.len());

    DashboardView {
        caption: selection.caption(),
        metrics: metrics::compute(&view, &config.measure_column),
        top_titles: top_titles(&view, &config.title_column, &config.measure_column, config.top_n),
        cumulative: cumulative_by_title(
            &view,
            &config.title_column,
            &config.measure_column,
            config.top_n,
        ),
        categories: category_distribution(&view),
        runtime_vs_measure: paired_series(&view, &config.runtime_column, &config.measure_column),
        correlation: correlation_matrix(&view),
        rows: view.indices,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::filter::CategoryFilter;
    use crate::data::loader::read_dataset;
    use crate::stats::charts::Unavailable;

    const SCENARIO: &str = "\
title,category,week,weekly_hours_viewed,runtime
Show A,Movie,2024-01-01,100,90
Show B,Series,2024-01-08,50,45
Show A,Movie,2024-01-08,120,90
";

    fn setup() -> (Dataset, DashboardConfig) {
        let config = DashboardConfig::default();
        let ds = read_dataset(SCENARIO.as_bytes(), &config).unwrap();
        (ds, config)
    }

    #[test]
    fn movie_scenario() {
        let (ds, config) = setup();
        let mut sel = FilterSelection::full(&ds);
        sel.category = CategoryFilter::Only("Movie".into());
        let jan = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        sel.set_range(&ds, jan(1), jan(8));

        let out = render(&ds, &sel, &config);
        assert_eq!(out.rows, vec![0, 2]);
        assert_eq!(out.metrics, Metrics { rows: 2, total: 220.0, peak: 120.0, mean: 110.0 });
        assert_eq!(
            out.top_titles.unwrap(),
            vec![TitleValue { title: "Show A".into(), value: 120.0 }]
        );
        assert_eq!(out.categories.unwrap().len(), 1);
        assert_eq!(out.runtime_vs_measure.unwrap(), vec![[90.0, 100.0], [90.0, 120.0]]);
        // Runtime is constant within the view.
        assert_eq!(out.correlation.unwrap().values[0][1], None);
        assert_eq!(out.caption, "Movie • 2024-01-01 → 2024-01-08");
    }

    #[test]
    fn empty_series_scenario() {
        let (ds, config) = setup();
        let mut sel = FilterSelection::full(&ds);
        sel.category = CategoryFilter::Only("Series".into());
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        sel.set_range(&ds, jan1, jan1);

        let out = render(&ds, &sel, &config);
        assert!(out.rows.is_empty());
        assert_eq!(out.metrics, Metrics::default());
        assert_eq!(out.top_titles, Err(Unavailable::NoRows));
        assert_eq!(out.cumulative, Err(Unavailable::NoRows));
        assert_eq!(out.categories, Err(Unavailable::NoRows));
        assert_eq!(out.runtime_vs_measure, Err(Unavailable::NoRows));
        assert_eq!(out.correlation, Err(Unavailable::NoRows));
    }

    #[test]
    fn missing_runtime_only_affects_scatter() {
        let config = DashboardConfig::default();
        let ds = read_dataset(
            "title,category,week,weekly_hours_viewed\nA,Movie,2024-01-01,5\n".as_bytes(),
            &config,
        )
        .unwrap();
        let out = render(&ds, &FilterSelection::full(&ds), &config);
        assert_eq!(out.runtime_vs_measure, Err(Unavailable::MissingColumn("runtime".into())));
        assert!(out.top_titles.is_ok());
        assert!(out.cumulative.is_ok());
        assert!(out.categories.is_ok());
        assert_eq!(out.correlation, Err(Unavailable::TooFewNumericColumns(1)));
        assert_eq!(out.metrics.rows, 1);
    }
}
