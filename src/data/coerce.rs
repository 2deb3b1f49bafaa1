//! Defensive value coercion shared by the loader and every consumer.
//!
//! Anything that cannot be interpreted becomes "missing" (`None` /
//! [`CellValue::Missing`]) instead of an error, so all aggregations drop
//! bad values the same way.

use chrono::{NaiveDate, NaiveDateTime};

use super::model::CellValue;

/// Tokens read as a missing cell.
const MISSING_TOKENS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Type a raw CSV field.
pub fn parse_cell(raw: &str) -> CellValue {
    let s = raw.trim();
    if MISSING_TOKENS.contains(&s) {
        return CellValue::Missing;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Some(f) = parse_finite(s) {
        return CellValue::Float(f);
    }
    if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") {
        return CellValue::Bool(s.eq_ignore_ascii_case("true"));
    }
    CellValue::Text(s.to_string())
}

/// Type a raw field of the week column: a date, or missing.
pub fn parse_date_cell(raw: &str) -> CellValue {
    to_date(raw).map_or(CellValue::Missing, CellValue::Date)
}

/// Parse a calendar date, discarding any time component.
pub fn to_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Interpret a cell as a number. Text is parsed; dates and missing cells
/// are not numbers.
pub fn to_number(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Integer(i) => Some(*i as f64),
        CellValue::Float(f) if f.is_finite() => Some(*f),
        CellValue::Float(_) => None,
        CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        CellValue::Text(s) => parse_finite(s.trim()),
        CellValue::Date(_) | CellValue::Missing => None,
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cell_types_fields() {
        assert_eq!(parse_cell(" 42 "), CellValue::Integer(42));
        assert_eq!(parse_cell("1.5"), CellValue::Float(1.5));
        assert_eq!(parse_cell("TRUE"), CellValue::Bool(true));
        assert_eq!(parse_cell("Show A"), CellValue::Text("Show A".into()));
        assert_eq!(parse_cell(""), CellValue::Missing);
        assert_eq!(parse_cell("NaN"), CellValue::Missing);
        assert_eq!(parse_cell("N/A"), CellValue::Missing);
        // "inf" parses as f64 but is not a usable number
        assert_eq!(parse_cell("inf"), CellValue::Text("inf".into()));
    }

    #[test]
    fn to_date_accepts_common_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 8);
        assert_eq!(to_date("2024-01-08"), expected);
        assert_eq!(to_date("2024/01/08"), expected);
        assert_eq!(to_date("01/08/2024"), expected);
        assert_eq!(to_date("2024-01-08 00:00:00"), expected);
        assert_eq!(to_date("2024-01-08T12:30:00"), expected);
    }

    #[test]
    fn unparseable_dates_become_missing() {
        assert_eq!(to_date("last week"), None);
        assert_eq!(to_date("2024-13-40"), None);
        assert_eq!(parse_date_cell("soon"), CellValue::Missing);
    }

    #[test]
    fn to_number_drops_non_numeric_values() {
        assert_eq!(to_number(&CellValue::Integer(3)), Some(3.0));
        assert_eq!(to_number(&CellValue::Text(" 2.5 ".into())), Some(2.5));
        assert_eq!(to_number(&CellValue::Text("1,000".into())), None);
        assert_eq!(to_number(&CellValue::Float(f64::NAN)), None);
        assert_eq!(to_number(&CellValue::Missing), None);
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(to_number(&CellValue::Date(d)), None);
    }
}
