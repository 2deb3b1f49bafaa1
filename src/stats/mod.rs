/// Aggregations over a filtered view: the metric cards and the chart series.
pub mod charts;
pub mod metrics;
