//! JSON path filters shared by the MySQL and PostgreSQL `json_filter` builders.
//!
//! A JSON filter value is an object whose keys are `__`-separated paths with an
//! optional trailing operator, e.g. `{"owner__name": "alice", "tags__0__not": "x",
//! "size__gte": 10}`. Numeric segments address array elements. Entries are AND-ed.

use crate::criterion::{Criterion, Equality};
use crate::error::{OrmError, OrmResult};
use crate::filters::escape_like;
use crate::term::Term;
use crate::value::Value;

/// One step of a JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Comparison applied at the end of a JSON path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonFilterOp {
    Exact,
    Not,
    IsNull,
    NotIsNull,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Contains,
    StartsWith,
    EndsWith,
}

impl JsonFilterOp {
    fn from_suffix(s: &str) -> Option<Self> {
        let op = match s {
            "not" => JsonFilterOp::Not,
            "isnull" => JsonFilterOp::IsNull,
            "not_isnull" => JsonFilterOp::NotIsNull,
            "gt" => JsonFilterOp::Gt,
            "gte" => JsonFilterOp::Gte,
            "lt" => JsonFilterOp::Lt,
            "lte" => JsonFilterOp::Lte,
            "in" => JsonFilterOp::In,
            "not_in" => JsonFilterOp::NotIn,
            "contains" => JsonFilterOp::Contains,
            "startswith" | "starts_with" => JsonFilterOp::StartsWith,
            "endswith" | "ends_with" => JsonFilterOp::EndsWith,
            _ => return None,
        };
        Some(op)
    }
}

/// A single parsed `path__op: value` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonFilter {
    pub path: Vec<PathSegment>,
    pub op: JsonFilterOp,
    pub value: serde_json::Value,
}

impl JsonFilter {
    /// Parse one key of a filter object.
    pub fn parse(key: &str, value: serde_json::Value) -> OrmResult<Self> {
        let mut parts: Vec<&str> = key.split("__").collect();
        let op = match parts.last().and_then(|last| JsonFilterOp::from_suffix(last)) {
            Some(op) if parts.len() > 1 => {
                parts.pop();
                op
            }
            _ => JsonFilterOp::Exact,
        };

        let mut path = Vec::with_capacity(parts.len());
        for part in parts {
            if part.is_empty() {
                return Err(OrmError::validation(format!(
                    "Empty segment in JSON filter key '{key}'"
                )));
            }
            match part.parse::<usize>() {
                Ok(idx) => path.push(PathSegment::Index(idx)),
                Err(_) => path.push(PathSegment::Key(part.to_string())),
            }
        }

        if matches!(op, JsonFilterOp::In | JsonFilterOp::NotIn) && !value.is_array() {
            return Err(OrmError::validation(format!(
                "JSON filter '{key}' expects an array value"
            )));
        }

        Ok(Self { path, op, value })
    }

    /// Parse every entry of a filter object.
    pub fn parse_all(value: &Value) -> OrmResult<Vec<Self>> {
        let object = match value {
            Value::Json(serde_json::Value::Object(map)) => map,
            _ => {
                return Err(OrmError::validation(
                    "json_filter expects a JSON object of `path__op: value` entries",
                ));
            }
        };
        if object.is_empty() {
            return Err(OrmError::validation("json_filter object is empty"));
        }
        object
            .iter()
            .map(|(key, v)| Self::parse(key, v.clone()))
            .collect()
    }
}

/// How a dialect reads values out of a JSON document.
pub(crate) trait JsonPathDialect {
    /// The value at `path` as SQL text (NULL when missing).
    fn text(&self, field: &Term, path: &[PathSegment]) -> Term;
    /// The value at `path` as a number.
    fn number(&self, field: &Term, path: &[PathSegment]) -> Term;
    /// The sub-document at `path`, comparable with [`JsonPathDialect::document_literal`].
    fn document(&self, field: &Term, path: &[PathSegment]) -> Term;
    fn document_literal(&self, value: &serde_json::Value) -> Term;
    /// The value at `path` as a boolean, when the dialect can cast to one.
    fn boolean(&self, _field: &Term, _path: &[PathSegment]) -> Option<Term> {
        None
    }
    fn like(&self, term: Term, pattern: String) -> Criterion;

    /// `path` is missing or holds JSON null; with `negated`, neither.
    fn null_check(&self, field: &Term, path: &[PathSegment], negated: bool) -> Criterion {
        if negated {
            Criterion::is_not_null(self.text(field, path))
        } else {
            Criterion::is_null(self.text(field, path))
        }
    }
}

/// JSON text for containment filters.
///
/// A string value is taken as an already-encoded JSON document; every other
/// value is encoded.
pub fn json_text(value: &Value) -> String {
    match value {
        Value::Str(s) => s.clone(),
        other => other.to_json().to_string(),
    }
}

/// Always-false criterion used for filter values the executor would have rejected.
pub(crate) fn never() -> Criterion {
    Criterion::Term(Term::value(false))
}

pub(crate) fn build_json_filter<D: JsonPathDialect>(
    dialect: &D,
    field: Term,
    value: &Value,
) -> Criterion {
    let Ok(filters) = JsonFilter::parse_all(value) else {
        return never();
    };
    let mut criteria: Vec<Criterion> = filters
        .iter()
        .map(|f| build_entry(dialect, &field, f))
        .collect();
    if criteria.len() == 1 {
        criteria.remove(0)
    } else {
        Criterion::and(criteria)
    }
}

fn build_entry<D: JsonPathDialect>(d: &D, field: &Term, f: &JsonFilter) -> Criterion {
    use serde_json::Value as J;

    let path = f.path.as_slice();
    let text = || d.text(field, path);

    match f.op {
        JsonFilterOp::IsNull | JsonFilterOp::NotIsNull => {
            let want_null = Value::from(f.value.clone()).is_truthy() == (f.op == JsonFilterOp::IsNull);
            d.null_check(field, path, !want_null)
        }
        JsonFilterOp::Exact | JsonFilterOp::Not => {
            let negate = f.op == JsonFilterOp::Not;
            let cmp = if negate { Equality::Ne } else { Equality::Eq };
            match &f.value {
                J::Null => d.null_check(field, path, negate),
                J::Number(_) => Criterion::basic(
                    cmp,
                    d.number(field, path),
                    Term::Value(Value::from(f.value.clone())),
                ),
                J::String(s) => Criterion::basic(cmp, text(), Term::value(s.as_str())),
                J::Bool(b) => match d.boolean(field, path) {
                    Some(left) => Criterion::basic(cmp, left, Term::value(*b)),
                    None => Criterion::basic(
                        cmp,
                        d.document(field, path),
                        d.document_literal(&f.value),
                    ),
                },
                J::Array(_) | J::Object(_) => Criterion::basic(
                    cmp,
                    d.document(field, path),
                    d.document_literal(&f.value),
                ),
            }
        }
        JsonFilterOp::Gt | JsonFilterOp::Gte | JsonFilterOp::Lt | JsonFilterOp::Lte => {
            let cmp = match f.op {
                JsonFilterOp::Gt => Equality::Gt,
                JsonFilterOp::Gte => Equality::Gte,
                JsonFilterOp::Lt => Equality::Lt,
                _ => Equality::Lte,
            };
            let left = if f.value.is_number() {
                d.number(field, path)
            } else {
                text()
            };
            Criterion::basic(cmp, left, Term::Value(Value::from(f.value.clone())))
        }
        JsonFilterOp::In | JsonFilterOp::NotIn => {
            let items = f.value.as_array().cloned().unwrap_or_default();
            let numeric = !items.is_empty() && items.iter().all(J::is_number);
            let left = if numeric { d.number(field, path) } else { text() };
            let values = items
                .into_iter()
                .map(|item| match item {
                    J::Number(_) if numeric => Term::Value(Value::from(item)),
                    J::String(s) => Term::value(s),
                    other => Term::value(other.to_string()),
                })
                .collect();
            if f.op == JsonFilterOp::In {
                Criterion::in_list(left, values)
            } else {
                Criterion::not_in(left, values)
            }
        }
        JsonFilterOp::Contains | JsonFilterOp::StartsWith | JsonFilterOp::EndsWith => {
            let raw = match &f.value {
                J::String(s) => s.clone(),
                other => other.to_string(),
            };
            let escaped = escape_like(&raw);
            let pattern = match f.op {
                JsonFilterOp::Contains => format!("%{escaped}%"),
                JsonFilterOp::StartsWith => format!("{escaped}%"),
                _ => format!("%{escaped}"),
            };
            d.like(text(), pattern)
        }
    }
}
