use chrono::NaiveDate;

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Filter inputs
// ---------------------------------------------------------------------------

/// Category selection: everything, or one observed category value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(c) => c,
        }
    }
}

/// Closed date interval, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Clamp both ends into `bounds`, swapping them if they cross.
    pub fn clamped(start: NaiveDate, end: NaiveDate, bounds: DateRange) -> Self {
        let start = start.clamp(bounds.start, bounds.end);
        let end = end.clamp(bounds.start, bounds.end);
        if start <= end {
            DateRange { start, end }
        } else {
            DateRange { start: end, end: start }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The user's current filter inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    pub category: CategoryFilter,
    /// `None` only when the dataset has no parseable week at all.
    pub range: Option<DateRange>,
}

impl FilterSelection {
    /// Everything selected: all categories, the dataset's full week span.
    pub fn full(dataset: &Dataset) -> Self {
        Self {
            category: CategoryFilter::All,
            range: dataset
                .week_bounds()
                .map(|(start, end)| DateRange { start, end }),
        }
    }

    /// Replace the date range, normalised against the dataset's bounds.
    pub fn set_range(&mut self, dataset: &Dataset, start: NaiveDate, end: NaiveDate) {
        if let Some((lo, hi)) = dataset.week_bounds() {
            let bounds = DateRange { start: lo, end: hi };
            self.range = Some(DateRange::clamped(start, end, bounds));
        }
    }

    /// Whether a single row passes both predicates.
    pub fn matches(&self, dataset: &Dataset, row: &[CellValue]) -> bool {
        let category_ok = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => {
                let cell = &row[dataset.category_column];
                !cell.is_missing() && cell.to_string() == *wanted
            }
        };
        if !category_ok {
            return false;
        }
        match self.range {
            None => true,
            Some(range) => match row[dataset.week_column] {
                CellValue::Date(d) => range.contains(d),
                _ => false,
            },
        }
    }

    /// Short caption, e.g. `Movie • 2024-01-01 → 2024-01-08`.
    pub fn caption(&self) -> String {
        match self.range {
            Some(r) => format!("{} • {} → {}", self.category.label(), r.start, r.end),
            None => self.category.label().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Rows of a dataset passing the active filters, in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    pub dataset: &'a Dataset,
    pub indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [CellValue]> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| dataset.rows[i].as_slice())
    }

    /// Cells of one column over the view's rows.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &'a CellValue> + '_ {
        self.rows().map(move |r| &r[col])
    }
}

/// Apply a selection to the dataset.
pub fn apply<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredView<'a> {
    let indices = dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| selection.matches(dataset, row))
        .map(|(i, _)| i)
        .collect();
    FilteredView { dataset, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn row(category: Option<&str>, week: Option<NaiveDate>) -> Vec<CellValue> {
        vec![
            category.map_or(CellValue::Missing, |c| CellValue::Text(c.into())),
            week.map_or(CellValue::Missing, CellValue::Date),
        ]
    }

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["category".into(), "week".into()],
            vec![
                row(Some("Movie"), Some(d(2024, 1, 1))),
                row(Some("Series"), Some(d(2024, 1, 8))),
                row(Some("Movie"), Some(d(2024, 1, 8))),
                row(None, Some(d(2024, 1, 15))),
                row(Some("Movie"), None),
                row(Some("Series"), Some(d(2024, 1, 22))),
            ],
            0,
            1,
        )
    }

    #[test]
    fn full_selection_keeps_rows_with_dates() {
        let ds = dataset();
        let sel = FilterSelection::full(&ds);
        assert_eq!(sel.range, Some(DateRange { start: d(2024, 1, 1), end: d(2024, 1, 22) }));
        // The undated row fails the date predicate.
        assert_eq!(apply(&ds, &sel).indices, vec![0, 1, 2, 3, 5]);
    }

    #[test]
    fn category_is_exact_match() {
        let ds = dataset();
        let mut sel = FilterSelection::full(&ds);
        sel.category = CategoryFilter::Only("Movie".into());
        assert_eq!(apply(&ds, &sel).indices, vec![0, 2]);
        sel.category = CategoryFilter::Only("movie".into());
        assert!(apply(&ds, &sel).is_empty());
    }

    #[test]
    fn date_range_is_inclusive() {
        let ds = dataset();
        let mut sel = FilterSelection::full(&ds);
        sel.set_range(&ds, d(2024, 1, 8), d(2024, 1, 15));
        assert_eq!(apply(&ds, &sel).indices, vec![1, 2, 3]);
    }

    #[test]
    fn set_range_clamps_and_swaps() {
        let ds = dataset();
        let mut sel = FilterSelection::full(&ds);
        sel.set_range(&ds, d(2030, 1, 1), d(2020, 1, 1));
        assert_eq!(sel.range, Some(DateRange { start: d(2024, 1, 1), end: d(2024, 1, 22) }));
    }

    #[test]
    fn retained_rows_match_and_excluded_rows_do_not() {
        let ds = dataset();
        let categories = [
            CategoryFilter::All,
            CategoryFilter::Only("Movie".into()),
            CategoryFilter::Only("Series".into()),
        ];
        let ranges = [
            (d(2024, 1, 1), d(2024, 1, 22)),
            (d(2024, 1, 8), d(2024, 1, 8)),
            (d(2024, 1, 9), d(2024, 1, 14)),
        ];
        for category in &categories {
            for &(start, end) in &ranges {
                let mut sel = FilterSelection::full(&ds);
                sel.category = category.clone();
                sel.set_range(&ds, start, end);
                let view = apply(&ds, &sel);
                for (i, r) in ds.rows.iter().enumerate() {
                    assert_eq!(view.indices.contains(&i), sel.matches(&ds, r));
                }
                assert!(view.len() <= ds.len());
            }
        }
    }

    #[test]
    fn no_dates_skips_date_predicate() {
        let ds = Dataset::new(
            vec!["category".into(), "week".into()],
            vec![row(Some("Movie"), None), row(Some("Series"), None)],
            0,
            1,
        );
        let sel = FilterSelection::full(&ds);
        assert!(sel.range.is_none());
        assert_eq!(apply(&ds, &sel).len(), 2);
        assert_eq!(sel.caption(), "All");
    }

    #[test]
    fn caption_names_category_and_range() {
        let ds = dataset();
        let mut sel = FilterSelection::full(&ds);
        sel.category = CategoryFilter::Only("Movie".into());
        sel.set_range(&ds, d(2024, 1, 1), d(2024, 1, 8));
        assert_eq!(sel.caption(), "Movie • 2024-01-01 → 2024-01-08");
    }
}
