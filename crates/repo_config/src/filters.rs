//! Candidate scan filters
//!
//! Filters narrow which discovered repository declarations become live
//! repositories. Include filters admit, exclude filters remove, and exclusion
//! always wins. With no include filters declared, every candidate inside the
//! base packages is admitted.

use regex::Regex;
use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::package_ref::{PackageRef, PACKAGE_SEPARATOR};

/// Borrowed view of a repository candidate, as seen by scan filters.
#[derive(Debug, Clone, Copy)]
pub struct CandidateSummary<'a> {
    /// Bare type name of the declared repository
    pub name: &'a str,
    /// Package the declaration lives in
    pub package: &'a PackageRef,
}

impl CandidateSummary<'_> {
    /// Returns the package-qualified candidate name
    pub fn qualified_name(&self) -> String {
        format!("{}{PACKAGE_SEPARATOR}{}", self.package, self.name)
    }
}

/// Outcome of running a candidate through the include/exclude sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// The candidate passed both sequences
    Admitted,
    /// Include filters were declared and none matched
    NotIncluded,
    /// An exclude filter matched
    Excluded,
}

/// A predicate applied to candidates during scanning.
#[derive(Clone)]
pub enum ScanFilter {
    /// Matches candidates with exactly this type name
    Name(String),
    /// Matches candidates declared in this package or below it
    Package(PackageRef),
    /// Matches candidates whose qualified name matches this pattern
    Pattern(Regex),
    /// Arbitrary predicate over the candidate summary
    Custom(Arc<dyn Fn(&CandidateSummary<'_>) -> bool + Send + Sync>),
}

impl ScanFilter {
    /// Filter on an exact type name
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Filter on a package subtree
    pub fn package(package: PackageRef) -> Self {
        Self::Package(package)
    }

    /// Filter on a qualified-name pattern.
    pub fn pattern(expr: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(expr)
            .map_err(|e| ConfigError::invalid_pattern(format!("'{expr}': {e}")))?;
        Ok(Self::Pattern(regex))
    }

    /// Filter on an arbitrary predicate
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&CandidateSummary<'_>) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }

    /// Returns true when the filter matches the candidate
    pub fn matches(&self, candidate: &CandidateSummary<'_>) -> bool {
        match self {
            Self::Name(name) => candidate.name == name,
            Self::Package(package) => package.contains(candidate.package),
            Self::Pattern(pattern) => pattern.is_match(&candidate.qualified_name()),
            Self::Custom(predicate) => predicate(candidate),
        }
    }
}

impl fmt::Debug for ScanFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Package(package) => f.debug_tuple("Package").field(package).finish(),
            Self::Pattern(pattern) => f.debug_tuple("Pattern").field(&pattern.as_str()).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Runs a candidate through both filter sequences.
pub fn evaluate_filters(
    include: &[ScanFilter],
    exclude: &[ScanFilter],
    candidate: &CandidateSummary<'_>,
) -> FilterDecision {
    if !include.is_empty() && !include.iter().any(|filter| filter.matches(candidate)) {
        return FilterDecision::NotIncluded;
    }
    if exclude.iter().any(|filter| filter.matches(candidate)) {
        return FilterDecision::Excluded;
    }
    FilterDecision::Admitted
}

/// Returns true when the candidate would be admitted.
pub fn passes_filters(
    include: &[ScanFilter],
    exclude: &[ScanFilter],
    candidate: &CandidateSummary<'_>,
) -> bool {
    evaluate_filters(include, exclude, candidate) == FilterDecision::Admitted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(path: &str) -> PackageRef {
        PackageRef::parse(path).unwrap()
    }

    #[test]
    fn test_name_filter_matches_exact_name() {
        let filter = ScanFilter::name("PolicyRepository");
        let repos = package("app::repos");
        let candidate = CandidateSummary {
            name: "PolicyRepository",
            package: &repos,
        };
        let other = CandidateSummary {
            name: "ClaimRepository",
            package: &repos,
        };

        assert!(filter.matches(&candidate));
        assert!(!filter.matches(&other));
    }

    #[test]
    fn test_package_filter_matches_subtree() {
        let filter = ScanFilter::package(package("app::repos"));
        let nested = package("app::repos::billing");
        let sibling = package("app::services");

        assert!(filter.matches(&CandidateSummary {
            name: "InvoiceRepository",
            package: &nested,
        }));
        assert!(!filter.matches(&CandidateSummary {
            name: "InvoiceRepository",
            package: &sibling,
        }));
    }

    #[test]
    fn test_pattern_filter_sees_qualified_name() {
        let filter = ScanFilter::pattern(r"Repository$").unwrap();
        let repos = package("app::repos");

        assert!(filter.matches(&CandidateSummary {
            name: "PolicyRepository",
            package: &repos,
        }));
        assert!(!filter.matches(&CandidateSummary {
            name: "PolicyService",
            package: &repos,
        }));
        assert!(ScanFilter::pattern("(unclosed").is_err());
    }

    #[test]
    fn test_exclusion_wins_over_inclusion() {
        let repos = package("app::repos");
        let candidate = CandidateSummary {
            name: "PolicyRepository",
            package: &repos,
        };
        let include = vec![ScanFilter::name("PolicyRepository")];
        let exclude = vec![ScanFilter::name("PolicyRepository")];

        assert_eq!(
            evaluate_filters(&include, &exclude, &candidate),
            FilterDecision::Excluded
        );
    }

    #[test]
    fn test_empty_include_admits_everything() {
        let repos = package("app::repos");
        let candidate = CandidateSummary {
            name: "PolicyRepository",
            package: &repos,
        };

        assert_eq!(
            evaluate_filters(&[], &[], &candidate),
            FilterDecision::Admitted
        );
        assert!(passes_filters(&[], &[], &candidate));
    }

    #[test]
    fn test_unmatched_include_reports_not_included() {
        let repos = package("app::repos");
        let candidate = CandidateSummary {
            name: "PolicyRepository",
            package: &repos,
        };
        let include = vec![ScanFilter::name("ClaimRepository")];

        assert_eq!(
            evaluate_filters(&include, &[], &candidate),
            FilterDecision::NotIncluded
        );
    }

    #[test]
    fn test_custom_filter_runs_predicate() {
        let filter = ScanFilter::custom(|candidate| candidate.name.starts_with("Policy"));
        let repos = package("app::repos");

        assert!(filter.matches(&CandidateSummary {
            name: "PolicyRepository",
            package: &repos,
        }));
        assert!(!filter.matches(&CandidateSummary {
            name: "ClaimRepository",
            package: &repos,
        }));
        assert_eq!(format!("{filter:?}"), "Custom(..)");
    }
}
