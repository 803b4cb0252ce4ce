//! Abstract filter operators and their backend-neutral builders.
//!
//! A [`FilterOp`] names a predicate independently of the backend. Each dialect
//! may override the builder for an operator through a static
//! [`FilterOverrides`] table; operators without an override fall back to
//! [`DEFAULT_FILTERS`]. Regex, full-text search and JSON operators have no
//! portable default.

use crate::criterion::{Criterion, Equality};
use crate::term::{SqlType, Term};
use crate::value::Value;
use std::fmt;

/// Builds a criterion from a field term and a filter value.
pub type FilterFn = fn(Term, &Value) -> Criterion;

/// Abstract filter operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    Exact,
    Not,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    IsNull,
    NotIsNull,
    Contains,
    StartsWith,
    EndsWith,
    InsensitiveExact,
    InsensitiveContains,
    InsensitiveStartsWith,
    InsensitiveEndsWith,
    Search,
    JsonContains,
    JsonContainedBy,
    JsonFilter,
    PosixRegex,
    InsensitivePosixRegex,
}

impl FilterOp {
    pub const ALL: [FilterOp; 23] = [
        FilterOp::Exact,
        FilterOp::Not,
        FilterOp::Gt,
        FilterOp::Gte,
        FilterOp::Lt,
        FilterOp::Lte,
        FilterOp::In,
        FilterOp::NotIn,
        FilterOp::IsNull,
        FilterOp::NotIsNull,
        FilterOp::Contains,
        FilterOp::StartsWith,
        FilterOp::EndsWith,
        FilterOp::InsensitiveExact,
        FilterOp::InsensitiveContains,
        FilterOp::InsensitiveStartsWith,
        FilterOp::InsensitiveEndsWith,
        FilterOp::Search,
        FilterOp::JsonContains,
        FilterOp::JsonContainedBy,
        FilterOp::JsonFilter,
        FilterOp::PosixRegex,
        FilterOp::InsensitivePosixRegex,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterOp::Exact => "exact",
            FilterOp::Not => "not",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
            FilterOp::In => "in",
            FilterOp::NotIn => "not_in",
            FilterOp::IsNull => "isnull",
            FilterOp::NotIsNull => "not_isnull",
            FilterOp::Contains => "contains",
            FilterOp::StartsWith => "starts_with",
            FilterOp::EndsWith => "ends_with",
            FilterOp::InsensitiveExact => "insensitive_exact",
            FilterOp::InsensitiveContains => "insensitive_contains",
            FilterOp::InsensitiveStartsWith => "insensitive_starts_with",
            FilterOp::InsensitiveEndsWith => "insensitive_ends_with",
            FilterOp::Search => "search",
            FilterOp::JsonContains => "json_contains",
            FilterOp::JsonContainedBy => "json_contained_by",
            FilterOp::JsonFilter => "json_filter",
            FilterOp::PosixRegex => "posix_regex",
            FilterOp::InsensitivePosixRegex => "insensitive_posix_regex",
        }
    }

    /// Parse a keyword-filter lookup suffix (`icontains`, `startswith`, ...).
    ///
    /// The canonical operator names are accepted as well. JSON lookups that
    /// collide with text lookups (`contains`) are resolved by the executor,
    /// which knows the field type.
    pub fn from_lookup(lookup: &str) -> Option<FilterOp> {
        let op = match lookup {
            "exact" => FilterOp::Exact,
            "not" => FilterOp::Not,
            "gt" => FilterOp::Gt,
            "gte" => FilterOp::Gte,
            "lt" => FilterOp::Lt,
            "lte" => FilterOp::Lte,
            "in" => FilterOp::In,
            "not_in" => FilterOp::NotIn,
            "isnull" => FilterOp::IsNull,
            "not_isnull" => FilterOp::NotIsNull,
            "contains" => FilterOp::Contains,
            "startswith" | "starts_with" => FilterOp::StartsWith,
            "endswith" | "ends_with" => FilterOp::EndsWith,
            "iexact" | "insensitive_exact" => FilterOp::InsensitiveExact,
            "icontains" | "insensitive_contains" => FilterOp::InsensitiveContains,
            "istartswith" | "insensitive_starts_with" => FilterOp::InsensitiveStartsWith,
            "iendswith" | "insensitive_ends_with" => FilterOp::InsensitiveEndsWith,
            "search" => FilterOp::Search,
            "json_contains" => FilterOp::JsonContains,
            "contained_by" | "json_contained_by" => FilterOp::JsonContainedBy,
            "filter" | "json_filter" => FilterOp::JsonFilter,
            "posix_regex" => FilterOp::PosixRegex,
            "iposix_regex" | "insensitive_posix_regex" => FilterOp::InsensitivePosixRegex,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A static operator → builder table.
///
/// Each operator appears at most once; absence means "use the default".
#[derive(Clone, Copy)]
pub struct FilterOverrides {
    entries: &'static [(FilterOp, FilterFn)],
}

impl FilterOverrides {
    pub const fn new(entries: &'static [(FilterOp, FilterFn)]) -> Self {
        Self { entries }
    }

    pub fn get(&self, op: FilterOp) -> Option<FilterFn> {
        self.entries
            .iter()
            .find(|(key, _)| *key == op)
            .map(|(_, build)| *build)
    }

    pub fn contains(&self, op: FilterOp) -> bool {
        self.get(op).is_some()
    }

    pub fn ops(&self) -> impl Iterator<Item = FilterOp> + '_ {
        self.entries.iter().map(|(op, _)| *op)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for FilterOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ops()).finish()
    }
}

/// Escape `LIKE` wildcards so the value matches literally.
///
/// Backslash becomes `\\`, `%` becomes `\%` and `_` becomes `\_`.
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Backend-neutral builders.
pub static DEFAULT_FILTERS: FilterOverrides = FilterOverrides::new(&[
    (FilterOp::Exact, exact),
    (FilterOp::Not, not_equal),
    (FilterOp::Gt, greater_than),
    (FilterOp::Gte, greater_equal),
    (FilterOp::Lt, less_than),
    (FilterOp::Lte, less_equal),
    (FilterOp::In, is_in),
    (FilterOp::NotIn, not_in),
    (FilterOp::IsNull, is_null),
    (FilterOp::NotIsNull, not_null),
    (FilterOp::Contains, contains),
    (FilterOp::StartsWith, starts_with),
    (FilterOp::EndsWith, ends_with),
    (FilterOp::InsensitiveExact, insensitive_exact),
    (FilterOp::InsensitiveContains, insensitive_contains),
    (FilterOp::InsensitiveStartsWith, insensitive_starts_with),
    (FilterOp::InsensitiveEndsWith, insensitive_ends_with),
]);

pub fn exact(field: Term, value: &Value) -> Criterion {
    if value.is_null() {
        return Criterion::is_null(field);
    }
    Criterion::eq(field, Term::Value(value.clone()))
}

pub fn not_equal(field: Term, value: &Value) -> Criterion {
    if value.is_null() {
        return Criterion::is_not_null(field);
    }
    Criterion::basic(Equality::Ne, field, Term::Value(value.clone()))
}

pub fn greater_than(field: Term, value: &Value) -> Criterion {
    Criterion::basic(Equality::Gt, field, Term::Value(value.clone()))
}

pub fn greater_equal(field: Term, value: &Value) -> Criterion {
    Criterion::basic(Equality::Gte, field, Term::Value(value.clone()))
}

pub fn less_than(field: Term, value: &Value) -> Criterion {
    Criterion::basic(Equality::Lt, field, Term::Value(value.clone()))
}

pub fn less_equal(field: Term, value: &Value) -> Criterion {
    Criterion::basic(Equality::Lte, field, Term::Value(value.clone()))
}

pub fn is_in(field: Term, value: &Value) -> Criterion {
    Criterion::in_list(field, value.as_list().into_iter().map(Term::Value).collect())
}

pub fn not_in(field: Term, value: &Value) -> Criterion {
    Criterion::not_in(field, value.as_list().into_iter().map(Term::Value).collect())
}

/// `isnull=true` tests for NULL, `isnull=false` for NOT NULL.
pub fn is_null(field: Term, value: &Value) -> Criterion {
    if value.is_truthy() {
        Criterion::is_null(field)
    } else {
        Criterion::is_not_null(field)
    }
}

pub fn not_null(field: Term, value: &Value) -> Criterion {
    if value.is_truthy() {
        Criterion::is_not_null(field)
    } else {
        Criterion::is_null(field)
    }
}

fn like_pattern(field: Term, pattern: String) -> Criterion {
    Criterion::like_escape(
        Term::cast(field, SqlType::Varchar),
        Term::value(pattern),
        '\\',
    )
}

fn insensitive_like_pattern(field: Term, pattern: String) -> Criterion {
    Criterion::like_escape(
        Term::upper(Term::cast(field, SqlType::Varchar)),
        Term::upper(Term::value(pattern)),
        '\\',
    )
}

pub fn contains(field: Term, value: &Value) -> Criterion {
    like_pattern(field, format!("%{}%", escape_like(&value.to_text())))
}

pub fn starts_with(field: Term, value: &Value) -> Criterion {
    like_pattern(field, format!("{}%", escape_like(&value.to_text())))
}

pub fn ends_with(field: Term, value: &Value) -> Criterion {
    like_pattern(field, format!("%{}", escape_like(&value.to_text())))
}

pub fn insensitive_exact(field: Term, value: &Value) -> Criterion {
    Criterion::eq(
        Term::upper(Term::cast(field, SqlType::Varchar)),
        Term::upper(Term::value(value.to_text())),
    )
}

pub fn insensitive_contains(field: Term, value: &Value) -> Criterion {
    insensitive_like_pattern(field, format!("%{}%", escape_like(&value.to_text())))
}

pub fn insensitive_starts_with(field: Term, value: &Value) -> Criterion {
    insensitive_like_pattern(field, format!("{}%", escape_like(&value.to_text())))
}

pub fn insensitive_ends_with(field: Term, value: &Value) -> Criterion {
    insensitive_like_pattern(field, format!("%{}", escape_like(&value.to_text())))
}
