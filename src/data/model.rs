use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a CSV column can take.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

/// Raw textual form, used for category matching, grouping and export.
/// Missing cells render as the empty string.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Missing => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Column – name plus the kind inferred over the whole dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Date,
    Boolean,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Columns in file order (an aliased title column is appended last).
    pub columns: Vec<Column>,
    /// Row-major cells; every row has exactly `columns.len()` cells.
    pub rows: Vec<Vec<CellValue>>,
    /// Index of the category column.
    pub category_column: usize,
    /// Index of the week (date) column.
    pub week_column: usize,
}

impl Dataset {
    /// Build a dataset, inferring each column's kind from its cells.
    /// `week_column` is always typed as a date column.
    pub fn new(
        names: Vec<String>,
        rows: Vec<Vec<CellValue>>,
        category_column: usize,
        week_column: usize,
    ) -> Self {
        let columns = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let kind = if idx == week_column {
                    ColumnKind::Date
                } else {
                    infer_kind(rows.iter().map(|r| &r[idx]))
                };
                Column { name, kind }
            })
            .collect();

        Dataset {
            columns,
            rows,
            category_column,
            week_column,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Indices of all numeric columns, in column order.
    pub fn numeric_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind == ColumnKind::Numeric)
            .map(|(i, _)| i)
            .collect()
    }

    /// Distinct non-missing category values, sorted.
    pub fn categories(&self) -> Vec<String> {
        let set: BTreeSet<String> = self
            .rows
            .iter()
            .map(|r| &r[self.category_column])
            .filter(|v| !v.is_missing())
            .map(|v| v.to_string())
            .collect();
        set.into_iter().collect()
    }

    /// Earliest and latest parsed week, or `None` when no week parsed.
    pub fn week_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.rows
            .iter()
            .filter_map(|r| match r[self.week_column] {
                CellValue::Date(d) => Some(d),
                _ => None,
            })
            .fold(None, |acc, d| match acc {
                None => Some((d, d)),
                Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
            })
    }
}

/// Numeric when every non-missing cell is a number (and one exists),
/// boolean when every non-missing cell is a boolean, text otherwise.
fn infer_kind<'a>(cells: impl Iterator<Item = &'a CellValue>) -> ColumnKind {
    let mut numeric = true;
    let mut boolean = true;
    let mut seen = false;
    for cell in cells {
        match cell {
            CellValue::Missing => continue,
            CellValue::Integer(_) | CellValue::Float(_) => boolean = false,
            CellValue::Bool(_) => numeric = false,
            CellValue::Text(_) | CellValue::Date(_) => {
                numeric = false;
                boolean = false;
            }
        }
        seen = true;
    }
    match (seen, numeric, boolean) {
        (false, _, _) => ColumnKind::Text,
        (true, true, _) => ColumnKind::Numeric,
        (true, false, true) => ColumnKind::Boolean,
        _ => ColumnKind::Text,
    }
}
