use std::path::Path;

use anyhow::{Context, Result};

use crate::data::filter::FilteredView;

// ---------------------------------------------------------------------------
// CSV export of the filtered rows
// ---------------------------------------------------------------------------

/// Serialize the view as UTF-8 CSV: header row, every dataset column,
/// fields quoted only when needed, missing cells empty.
pub fn to_csv(view: &FilteredView<'_>) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer
        .write_record(view.dataset.column_names())
        .context("writing CSV header")?;
    for (n, row) in view.rows().enumerate() {
        writer
            .write_record(row.iter().map(|cell| cell.to_string()))
            .with_context(|| format!("writing CSV row {n}"))?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV buffer: {}", e.error()))
}

/// Write the view to `path`.
pub fn save_csv(view: &FilteredView<'_>, path: &Path) -> Result<()> {
    let bytes = to_csv(view)?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} rows to {}", view.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::data::filter::{apply, CategoryFilter, FilterSelection};
    use crate::data::loader::{load_file, read_dataset};

    const CSV: &str = "\
show_title,category,week,weekly_hours_viewed,runtime,note
\"Show, A\",Movie,2024-01-01,100,90,
Show B,Series,01/08/2024,50.5,,\"said \"\"hi\"\"\"
Show A,Movie,bad date,120,90,x
";

    #[test]
    fn round_trip_keeps_rows_and_columns() {
        let config = DashboardConfig::default();
        let ds = read_dataset(CSV.as_bytes(), &config).unwrap();
        let view = apply(&ds, &FilterSelection::full(&ds));
        assert_eq!(view.len(), 2);

        let bytes = to_csv(&view).unwrap();
        let back = read_dataset(bytes.as_slice(), &config).unwrap();
        assert_eq!(back.len(), view.len());
        assert_eq!(
            back.column_names().collect::<Vec<_>>(),
            ds.column_names().collect::<Vec<_>>()
        );
        assert_eq!(back.rows[0][0].to_string(), "Show, A");
        assert_eq!(back.rows[1][5].to_string(), "said \"hi\"");
    }

    #[test]
    fn writes_iso_dates_and_empty_missing_cells() {
        let config = DashboardConfig::default();
        let ds = read_dataset(CSV.as_bytes(), &config).unwrap();
        let mut sel = FilterSelection::full(&ds);
        sel.category = CategoryFilter::Only("Series".into());
        let text = String::from_utf8(to_csv(&apply(&ds, &sel)).unwrap()).unwrap();
        assert_eq!(
            text,
            "show_title,category,week,weekly_hours_viewed,runtime,note,title\n\
             Show B,Series,2024-01-08,50.5,,\"said \"\"hi\"\"\",Show B\n"
        );
    }

    #[test]
    fn empty_view_exports_header_only() {
        let config = DashboardConfig::default();
        let ds = read_dataset(CSV.as_bytes(), &config).unwrap();
        let mut sel = FilterSelection::full(&ds);
        sel.category = CategoryFilter::Only("Documentary".into());
        let text = String::from_utf8(to_csv(&apply(&ds, &sel)).unwrap()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn save_csv_writes_file() {
        let config = DashboardConfig::default();
        let ds = read_dataset(CSV.as_bytes(), &config).unwrap();
        let view = apply(&ds, &FilterSelection::full(&ds));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(&config.export_file_name);
        save_csv(&view, &path).unwrap();
        assert_eq!(load_file(&path, &config).unwrap().len(), 2);
    }
}
