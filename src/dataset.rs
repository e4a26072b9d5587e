//! Dataset identifiers and the source/output column vocabulary.

use std::fmt;

/// Source column holding the `YYYY-MM` reference period.
pub const REF_DATE: &str = "REF_DATE";
/// Source and output column holding the geography name.
pub const GEO: &str = "GEO";
/// Source column holding the industry classification.
pub const NAICS: &str = "North American Industry Classification System (NAICS)";
/// Source column used by the industry employee-type filter.
pub const EMPLOYEE_TYPE: &str = "Type of employee";
/// Source and output column holding the statistic name.
pub const STATISTICS: &str = "Statistics";
/// Source and output column holding the numeric observation.
pub const VALUE: &str = "VALUE";

/// The only employee type the industry transform keeps.
pub const ALL_EMPLOYEES: &str = "All employees";
/// Lower bound (inclusive, lexical) on `REF_DATE` for the industry dataset.
pub const NAICS_MIN_REF_DATE: &str = "2015-01";

/// One of the three labour-market tables handled by the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dataset {
    /// Employment by industry (NAICS).
    Naics,
    /// Monthly job vacancies.
    Monthly,
    /// Quarterly job vacancies by industry, one source file per region.
    Quarterly,
}

impl Dataset {
    /// All datasets in the order the pipelines run them.
    pub const ALL: [Self; 3] = [Self::Naics, Self::Monthly, Self::Quarterly];

    /// Short label used in log lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Naics => "NAICS",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
        }
    }

    /// Columns the extractor must find in every source header.
    #[must_use]
    pub const fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Naics => &[REF_DATE, GEO, NAICS, EMPLOYEE_TYPE, VALUE],
            Self::Monthly => &[REF_DATE, GEO, STATISTICS, VALUE],
            Self::Quarterly => &[REF_DATE, GEO, NAICS, STATISTICS, VALUE],
        }
    }

    /// Whether the input location is a glob over many same-shaped files.
    #[must_use]
    pub const fn is_multi_file(self) -> bool {
        matches!(self, Self::Quarterly)
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
