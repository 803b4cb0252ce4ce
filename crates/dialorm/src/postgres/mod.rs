//! PostgreSQL dialect: POSIX regex operators, `jsonb` containment and path
//! filters, and the `RETURNING`-row insert handler.
//!
//! Everything not listed in [`POSTGRES_FILTER_OVERRIDES`] falls back to
//! [`DEFAULT_FILTERS`](crate::filters::DEFAULT_FILTERS).

mod insert;
mod json;
mod regex;

pub use insert::process_insert_result;
pub use json::{
    path_literal, postgres_json_contained_by, postgres_json_contains, postgres_json_filter,
};
pub use regex::{postgres_insensitive_posix_regex, postgres_posix_regex};

use crate::filters::{FilterOp, FilterOverrides};

/// PostgreSQL POSIX regular expression operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostgresRegexMatching {
    PosixRegex,
    InsensitivePosixRegex,
}

impl PostgresRegexMatching {
    pub fn as_str(self) -> &'static str {
        match self {
            PostgresRegexMatching::PosixRegex => " ~ ",
            PostgresRegexMatching::InsensitivePosixRegex => " ~* ",
        }
    }
}

/// `jsonb` containment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonComparator {
    /// `@>`: left contains right.
    Contains,
    /// `<@`: left is contained by right.
    ContainedBy,
}

impl JsonComparator {
    pub fn as_str(self) -> &'static str {
        match self {
            JsonComparator::Contains => " @> ",
            JsonComparator::ContainedBy => " <@ ",
        }
    }
}

/// Builders that replace the defaults when rendering for PostgreSQL.
pub static POSTGRES_FILTER_OVERRIDES: FilterOverrides = FilterOverrides::new(&[
    (FilterOp::PosixRegex, postgres_posix_regex),
    (FilterOp::InsensitivePosixRegex, postgres_insensitive_posix_regex),
    (FilterOp::JsonContains, postgres_json_contains),
    (FilterOp::JsonContainedBy, postgres_json_contained_by),
    (FilterOp::JsonFilter, postgres_json_filter),
]);
