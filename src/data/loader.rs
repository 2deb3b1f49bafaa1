use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::coerce::{parse_cell, parse_date_cell};
use super::model::{CellValue, Dataset};
use crate::config::DashboardConfig;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal load failures. Any of these stops the dashboard from rendering.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File '{}' not found. Make sure it is in the working directory.", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to parse CSV: {0}")]
    Parse(#[from] csv::Error),

    #[error("Required column '{0}' is missing")]
    MissingColumn(String),

    #[error("CSV row {row} has {found} fields but the header has {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the dataset from `path`.
pub fn load_file(path: &Path, config: &DashboardConfig) -> Result<Dataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let file = std::fs::File::open(path).map_err(|e| LoadError::Read {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    let dataset = read_dataset(file, config).map_err(|e| match e {
        LoadError::Parse(source) => LoadError::Read {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        dataset.len(),
        dataset.column_names().collect::<Vec<_>>(),
        path.display()
    );
    Ok(dataset)
}

/// Parse a CSV stream with a header row into a [`Dataset`].
///
/// * every cell is typed through [`parse_cell`]
/// * the week column is parsed as dates; unparseable values become missing
/// * a missing title column is aliased from `config.title_alias`
/// * short rows are padded with missing cells, long rows are an error
pub fn read_dataset<R: Read>(input: R, config: &DashboardConfig) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let mut names: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let week_idx = position(&names, &config.week_column)?;
    let category_idx = position(&names, &config.category_column)?;
    let n_fields = names.len();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() > n_fields {
            return Err(LoadError::RaggedRow {
                row: row_no + 1,
                found: record.len(),
                expected: n_fields,
            });
        }

        let cells: Vec<CellValue> = (0..n_fields)
            .map(|idx| {
                let raw = record.get(idx).unwrap_or("");
                if idx == week_idx {
                    parse_date_cell(raw)
                } else {
                    parse_cell(raw)
                }
            })
            .collect();

        if record.len() < n_fields {
            log::debug!("CSV row {} padded from {} fields", row_no + 1, record.len());
        }
        rows.push(cells);
    }

    alias_title_column(&mut names, &mut rows, config);

    Ok(Dataset::new(names, rows, category_idx, week_idx))
}

fn position(names: &[String], wanted: &str) -> Result<usize, LoadError> {
    names
        .iter()
        .position(|n| n == wanted)
        .ok_or_else(|| LoadError::MissingColumn(wanted.to_string()))
}

/// Append a copy of the alias column under the canonical title name.
fn alias_title_column(names: &mut Vec<String>, rows: &mut [Vec<CellValue>], config: &DashboardConfig) {
    if names.iter().any(|n| *n == config.title_column) {
        return;
    }
    let Some(alias_idx) = names.iter().position(|n| *n == config.title_alias) else {
        return;
    };
    log::debug!(
        "Aliasing '{}' as '{}'",
        config.title_alias,
        config.title_column
    );
    names.push(config.title_column.clone());
    for row in rows.iter_mut() {
        let value = row[alias_idx].clone();
        row.push(value);
    }
}
