//! Domain Value Objects
//!
//! Immutable value types for the problems domain.

use kernel::id::Id;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marker for problem identifiers
pub enum ProblemMarker {}

/// Store-assigned problem identifier
pub type ProblemId = Id<ProblemMarker>;

// ============================================================================
// Status
// ============================================================================

/// Submitter's situation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProblemStatus {
    Working,
    Student,
    #[default]
    Neither,
}

impl ProblemStatus {
    pub const ALL: [ProblemStatus; 3] = [
        ProblemStatus::Working,
        ProblemStatus::Student,
        ProblemStatus::Neither,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemStatus::Working => "Working",
            ProblemStatus::Student => "Student",
            ProblemStatus::Neither => "Neither",
        }
    }
}

/// Exact, case-sensitive match on the stored spelling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus;

impl FromStr for ProblemStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(UnknownStatus)
    }
}

impl fmt::Display for ProblemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Sorting
// ============================================================================

/// Column a listing is ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    CreatedAt,
    Name,
    Field,
    Status,
}

impl SortKey {
    /// Parse a client-supplied key; anything unrecognized falls back to
    /// [`SortKey::CreatedAt`] so that typos never fail a listing.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("name") => SortKey::Name,
            Some("field") => SortKey::Field,
            Some("status") => SortKey::Status,
            _ => SortKey::CreatedAt,
        }
    }

    /// Whitelisted column name. Never interpolate client input instead.
    pub fn column(&self) -> &'static str {
        match self {
            SortKey::CreatedAt => "created_at_ms",
            SortKey::Name => "name",
            SortKey::Field => "field",
            SortKey::Status => "status",
        }
    }
}

/// Listing direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `asc` in any casing is ascending; everything else is descending
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.trim().eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

// ============================================================================
// Query
// ============================================================================

/// Filter and ordering for a listing
///
/// Filters are exact-match and combined with AND. A status filter is kept
/// as raw text so that an unknown value simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemQuery {
    pub field: Option<String>,
    pub status: Option<String>,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl ProblemQuery {
    /// Build from raw query-string values; blank filters mean "no filter"
    pub fn from_raw(
        field: Option<&str>,
        status: Option<&str>,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
    ) -> Self {
        fn filter(raw: Option<&str>) -> Option<String> {
            raw.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        }

        Self {
            field: filter(field),
            status: filter(status),
            sort_key: SortKey::parse_lenient(sort_by),
            sort_order: SortOrder::parse_lenient(sort_order),
        }
    }
}
