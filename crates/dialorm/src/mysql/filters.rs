use super::MySqlRegexpComparator;
use super::search::SearchCriterion;
use crate::criterion::Criterion;
use crate::filters::escape_like;
use crate::term::{SqlType, Term};
use crate::value::Value;

fn char_field(field: Term) -> Term {
    Term::cast(field, SqlType::Char)
}

fn pattern(value: &Value, prefix: &str, suffix: &str) -> Term {
    Term::str(format!("{prefix}{}{suffix}", escape_like(&value.to_text())))
}

/// `CAST(field AS CHAR) LIKE '%value%'`
pub fn mysql_contains(field: Term, value: &Value) -> Criterion {
    Criterion::like(char_field(field), pattern(value, "%", "%"))
}

/// `CAST(field AS CHAR) LIKE 'value%'`
pub fn mysql_starts_with(field: Term, value: &Value) -> Criterion {
    Criterion::like(char_field(field), pattern(value, "", "%"))
}

/// `CAST(field AS CHAR) LIKE '%value'`
pub fn mysql_ends_with(field: Term, value: &Value) -> Criterion {
    Criterion::like(char_field(field), pattern(value, "%", ""))
}

/// `UPPER(CAST(field AS CHAR))=UPPER('value')`
///
/// An equality test, so the value is plain text through the default literal
/// renderer, not a pattern.
pub fn mysql_insensitive_exact(field: Term, value: &Value) -> Criterion {
    Criterion::eq(
        Term::upper(char_field(field)),
        Term::upper(Term::value(value.to_text())),
    )
}

pub fn mysql_insensitive_contains(field: Term, value: &Value) -> Criterion {
    Criterion::like(
        Term::upper(char_field(field)),
        Term::upper(pattern(value, "%", "%")),
    )
}

pub fn mysql_insensitive_starts_with(field: Term, value: &Value) -> Criterion {
    Criterion::like(
        Term::upper(char_field(field)),
        Term::upper(pattern(value, "", "%")),
    )
}

pub fn mysql_insensitive_ends_with(field: Term, value: &Value) -> Criterion {
    Criterion::like(
        Term::upper(char_field(field)),
        Term::upper(pattern(value, "%", "")),
    )
}

/// `MATCH(field) AGAINST('value')`
pub fn mysql_search(field: Term, value: &Value) -> Criterion {
    SearchCriterion::new(vec![field], Term::str(value.to_text()), None)
}

/// `CAST(field AS VARCHAR) REGEXP 'value'`
pub fn mysql_posix_regex(field: Term, value: &Value) -> Criterion {
    Criterion::basic(
        MySqlRegexpComparator::Regexp,
        Term::cast(field, SqlType::Varchar),
        Term::str(value.to_text()),
    )
}
