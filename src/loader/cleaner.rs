//! Turns noisy text cells ("114.0*", "  3#", "---") into numbers.

use polars::prelude::*;
use regex::Regex;
use std::sync::LazyLock;

/// First signed or unsigned decimal or integer numeral in a cell.
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?(?:\d*\.\d+|\d+)").expect("Invalid regex"));

/// Extracts the first numeral found in `text`, ignoring anything around it.
///
/// Station tables mark estimated or provisional readings with trailing symbols
/// (`*`, `#`, `Provisional`) and missing readings with placeholders such as `---`.
/// Returns `None` when the text holds no numeral at all.
///
/// # Examples
///
/// ```
/// use rainfall_archive::extract_number;
///
/// assert_eq!(extract_number("114.0*"), Some(114.0));
/// assert_eq!(extract_number("  -3.5#"), Some(-3.5));
/// assert_eq!(extract_number("---"), None);
/// ```
pub fn extract_number(text: &str) -> Option<f64> {
    NUMBER_RE
        .find(text)
        .and_then(|found| found.as_str().parse().ok())
}

/// Cleans a single column into `Float64`, cell by cell, through [`extract_number`].
///
/// The column is first cast to text so already-numeric columns pass through unchanged.
/// Null cells stay null.
pub fn clean_column(column: &Column) -> PolarsResult<Column> {
    let text = column.cast(&DataType::String)?;
    let values: Vec<Option<f64>> = text
        .str()?
        .into_iter()
        .map(|cell| cell.and_then(extract_number))
        .collect();
    Ok(Column::new(column.name().clone(), values))
}

/// Returns a copy of `frame` where every column at one of `positions` has been
/// cleaned with [`clean_column`]. Other columns are kept as they are.
///
/// Positions past the last column are ignored; callers check widths against
/// their own layout.
pub fn clean_frame(frame: &DataFrame, positions: &[usize]) -> PolarsResult<DataFrame> {
    let columns = frame
        .get_columns()
        .iter()
        .enumerate()
        .map(|(i, column)| {
            if positions.contains(&i) {
                clean_column(column)
            } else {
                Ok(column.clone())
            }
        })
        .collect::<PolarsResult<Vec<_>>>()?;
    DataFrame::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_numbers() {
        assert_eq!(extract_number("1941"), Some(1941.0));
        assert_eq!(extract_number("58.0"), Some(58.0));
        assert_eq!(extract_number(".5"), Some(0.5));
        assert_eq!(extract_number("0"), Some(0.0));
    }

    #[test]
    fn test_extract_ignores_surrounding_noise() {
        assert_eq!(extract_number("114.0*"), Some(114.0));
        assert_eq!(extract_number("  72.4#"), Some(72.4));
        assert_eq!(extract_number("2023 Provisional"), Some(2023.0));
        assert_eq!(extract_number("approx 12.5 mm"), Some(12.5));
    }

    #[test]
    fn test_extract_signed_numbers() {
        assert_eq!(extract_number("-1.2"), Some(-1.2));
        assert_eq!(extract_number("+3"), Some(3.0));
        assert_eq!(extract_number("-4"), Some(-4.0));
    }

    #[test]
    fn test_extract_takes_first_numeral() {
        assert_eq!(extract_number("12.5 / 13.0"), Some(12.5));
        assert_eq!(extract_number("7."), Some(7.0));
    }

    #[test]
    fn test_extract_without_numeral() {
        assert_eq!(extract_number(""), None);
        assert_eq!(extract_number("---"), None);
        assert_eq!(extract_number("nan"), None);
        assert_eq!(extract_number("*"), None);
    }

    #[test]
    fn test_clean_frame_converts_selected_positions() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!(
            "yyyy" => ["1941", "1941", "1942"],
            "note" => ["a", "b", "c"],
            "rain" => [Some("114.0*"), Some("---"), None],
        )?;

        let cleaned = clean_frame(&frame, &[0, 2])?;

        assert_eq!(cleaned.width(), 3);
        assert_eq!(cleaned.column("yyyy")?.dtype(), &DataType::Float64);
        assert_eq!(cleaned.column("note")?.dtype(), &DataType::String);

        let rain: Vec<Option<f64>> = cleaned.column("rain")?.f64()?.into_iter().collect();
        assert_eq!(rain, vec![Some(114.0), None, None]);
        Ok(())
    }
}
