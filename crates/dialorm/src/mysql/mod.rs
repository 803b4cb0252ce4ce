//! MySQL dialect: filter overrides, full-text search, JSON functions and the
//! auto-increment insert-result handler.
//!
//! Text filters cast the column to `CHAR` and match against patterns wrapped
//! with the quote-doubling value wrapper ([`Term::Str`](crate::Term::Str))
//! rather than the default literal renderer. Patterns are escaped with
//! [`escape_like`](crate::filters::escape_like) and no `ESCAPE` clause is
//! emitted, so the server's default `\` escape applies.

mod filters;
mod insert;
mod json;
mod search;

pub use filters::{
    mysql_contains, mysql_ends_with, mysql_insensitive_contains, mysql_insensitive_ends_with,
    mysql_insensitive_exact, mysql_insensitive_starts_with, mysql_posix_regex, mysql_search,
    mysql_starts_with,
};
pub use insert::process_insert_result;
pub use json::{json_path, mysql_json_contained_by, mysql_json_contains, mysql_json_filter};
pub use search::{SearchCriterion, SearchMode};

use crate::filters::{FilterOp, FilterOverrides};

/// MySQL regex comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MySqlRegexpComparator {
    Regexp,
}

impl MySqlRegexpComparator {
    pub fn as_str(self) -> &'static str {
        match self {
            MySqlRegexpComparator::Regexp => " REGEXP ",
        }
    }
}

/// Builders that replace the defaults when rendering for MySQL.
pub static MYSQL_FILTER_OVERRIDES: FilterOverrides = FilterOverrides::new(&[
    (FilterOp::Contains, mysql_contains),
    (FilterOp::StartsWith, mysql_starts_with),
    (FilterOp::EndsWith, mysql_ends_with),
    (FilterOp::InsensitiveExact, mysql_insensitive_exact),
    (FilterOp::InsensitiveContains, mysql_insensitive_contains),
    (FilterOp::InsensitiveStartsWith, mysql_insensitive_starts_with),
    (FilterOp::InsensitiveEndsWith, mysql_insensitive_ends_with),
    (FilterOp::Search, mysql_search),
    (FilterOp::JsonContains, mysql_json_contains),
    (FilterOp::JsonContainedBy, mysql_json_contained_by),
    (FilterOp::JsonFilter, mysql_json_filter),
    (FilterOp::PosixRegex, mysql_posix_regex),
]);
