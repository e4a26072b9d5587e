//! Output partitioning by `(Year, GEO)`.
//!
//! Partition directories follow the Hive layout Spark writes:
//! `Year=2021/GEO=Ontario/`. Characters that are unsafe in a path segment are
//! percent-escaped, and a null or empty value maps to
//! [`HIVE_DEFAULT_PARTITION`].

use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Directory value used for null partition values.
pub const HIVE_DEFAULT_PARTITION: &str = "__HIVE_DEFAULT_PARTITION__";

/// Name of the year partition column.
pub const YEAR_COLUMN: &str = "Year";

/// Derived key that decides where a record is written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartitionKey {
    pub year: Option<i32>,
    pub geo: String,
}

impl PartitionKey {
    pub fn new(year: Option<i32>, geo: impl Into<String>) -> Self {
        Self {
            year,
            geo: geo.into(),
        }
    }

    /// Relative directory for this key, e.g. `Year=2021/GEO=Nova Scotia`.
    #[must_use]
    pub fn dir(&self) -> String {
        let year = self
            .year
            .map_or_else(|| HIVE_DEFAULT_PARTITION.to_string(), |y| y.to_string());
        format!(
            "{YEAR_COLUMN}={year}/{}={}",
            crate::dataset::GEO,
            escape_path_name(&self.geo)
        )
    }
}

/// Records that carry their own partition key.
pub trait PartitionedRecord {
    /// Output columns that are encoded in the directory path rather than the file.
    const PARTITION_COLUMNS: [&'static str; 2] = [YEAR_COLUMN, crate::dataset::GEO];

    fn partition_key(&self) -> PartitionKey;
}

/// Rows grouped by partition, ordered by key, input order kept within a group.
pub type PartitionedRows<T> = BTreeMap<PartitionKey, Vec<T>>;

fn needs_escaping(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '"' | '#' | '%' | '\'' | '*' | '/' | ':' | '=' | '?' | '\\' | '{' | '[' | ']' | '^'
        )
}

/// Escape a partition value the way Hive does for directory names.
#[must_use]
pub fn escape_path_name(value: &str) -> String {
    if value.is_empty() {
        return HIVE_DEFAULT_PARTITION.to_string();
    }
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if needs_escaping(c) {
            let mut buf = [0u8; 4];
            for b in c.encode_utf8(&mut buf).bytes() {
                let _ = write!(out, "%{b:02X}");
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_uses_hive_layout() {
        let k = PartitionKey::new(Some(2021), "Ontario");
        assert_eq!(k.dir(), "Year=2021/GEO=Ontario");
    }

    #[test]
    fn unsafe_characters_are_escaped() {
        assert_eq!(escape_path_name("Newfoundland and Labrador"), "Newfoundland and Labrador");
        assert_eq!(escape_path_name("a/b=c"), "a%2Fb%3Dc");
        assert_eq!(escape_path_name("50%"), "50%25");
    }

    #[test]
    fn null_values_go_to_default_partition() {
        let k = PartitionKey::new(None, "");
        assert_eq!(
            k.dir(),
            format!("Year={HIVE_DEFAULT_PARTITION}/GEO={HIVE_DEFAULT_PARTITION}")
        );
    }

    #[test]
    fn keys_order_by_year_then_geo() {
        let mut keys = vec![
            PartitionKey::new(Some(2020), "Quebec"),
            PartitionKey::new(Some(2019), "Yukon"),
            PartitionKey::new(Some(2020), "Alberta"),
        ];
        keys.sort();
        assert_eq!(keys[0], PartitionKey::new(Some(2019), "Yukon"));
        assert_eq!(keys[1], PartitionKey::new(Some(2020), "Alberta"));
    }
}
