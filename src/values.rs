//! Cell-level coercions shared by the three transforms.

use chrono::{Datelike, NaiveDate};

/// Parse a `VALUE` cell as `f64`.
///
/// Surrounding whitespace is ignored. Empty or non-numeric cells yield `None`
/// instead of an error; one bad cell never aborts its row or the run.
#[must_use]
pub fn coerce_value(cell: &str) -> Option<f64> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Strip leading and trailing spaces from a string cell. Tabs and newlines stay.
#[must_use]
pub fn trim_cell(cell: &str) -> String {
    cell.trim_matches(' ').to_string()
}

/// Calendar year of a `YYYY-MM` reference date.
///
/// Returns `None` when the cell does not parse under that pattern.
#[must_use]
pub fn derive_year(ref_date: &str) -> Option<i32> {
    let s = ref_date.trim();
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

/// Lexical `>=` on reference dates.
///
/// Equivalent to a calendar comparison only for zero-padded `YYYY-MM` strings.
#[must_use]
pub fn ref_date_at_least(ref_date: &str, lower: &str) -> bool {
    ref_date >= lower
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_value_accepts_numbers_and_nulls_the_rest() {
        assert_eq!(coerce_value("100"), Some(100.0));
        assert_eq!(coerce_value(" 12.5 "), Some(12.5));
        assert_eq!(coerce_value("-3e2"), Some(-300.0));
        assert_eq!(coerce_value(""), None);
        assert_eq!(coerce_value("abc"), None);
        assert_eq!(coerce_value(".."), None);
    }

    #[test]
    fn trim_cell_strips_only_spaces() {
        assert_eq!(trim_cell("  Ontario "), "Ontario");
        assert_eq!(trim_cell("\tOntario "), "\tOntario");
        assert_eq!(trim_cell(" Quebec\n"), "Quebec\n");
        assert_eq!(trim_cell("   "), "");
    }

    #[test]
    fn derive_year_reads_yyyy_mm() {
        assert_eq!(derive_year("2021-07"), Some(2021));
        assert_eq!(derive_year(" 2016-03 "), Some(2016));
        assert_eq!(derive_year("2021-13"), None);
        assert_eq!(derive_year("July 2021"), None);
        assert_eq!(derive_year(""), None);
    }

    #[test]
    fn ref_date_comparison_is_lexical() {
        assert!(ref_date_at_least("2015-01", "2015-01"));
        assert!(ref_date_at_least("2020-11", "2015-01"));
        assert!(!ref_date_at_least("2014-12", "2015-01"));
    }
}
