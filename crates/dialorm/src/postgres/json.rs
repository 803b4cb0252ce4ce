use super::JsonComparator;
use crate::criterion::Criterion;
use crate::json::{JsonPathDialect, PathSegment, build_json_filter, json_text};
use crate::term::{JsonPathOperator, SqlType, Term};
use crate::value::Value;

/// Render a path as a PostgreSQL text array literal body: `{owner,tags,0}`.
///
/// Elements holding array syntax characters or whitespace are double-quoted.
pub fn path_literal(path: &[PathSegment]) -> String {
    let mut out = String::from("{");
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        match segment {
            PathSegment::Index(idx) => out.push_str(&idx.to_string()),
            PathSegment::Key(key) if needs_quoting(key) => {
                out.push('"');
                for ch in key.chars() {
                    if matches!(ch, '"' | '\\') {
                        out.push('\\');
                    }
                    out.push(ch);
                }
                out.push('"');
            }
            PathSegment::Key(key) => out.push_str(key),
        }
    }
    out.push('}');
    out
}

fn needs_quoting(key: &str) -> bool {
    key.is_empty()
        || key.eq_ignore_ascii_case("null")
        || key
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '{' | '}' | ',' | '"' | '\\'))
}

fn extract(field: &Term, op: JsonPathOperator, path: &[PathSegment]) -> Term {
    Term::json_path(field.clone(), op, Term::value(path_literal(path)))
}

struct PostgresJson;

impl JsonPathDialect for PostgresJson {
    fn text(&self, field: &Term, path: &[PathSegment]) -> Term {
        extract(field, JsonPathOperator::GetPathText, path)
    }

    fn number(&self, field: &Term, path: &[PathSegment]) -> Term {
        Term::cast(self.text(field, path), SqlType::Numeric)
    }

    fn document(&self, field: &Term, path: &[PathSegment]) -> Term {
        // json columns have no equality operator; compare as jsonb.
        Term::cast(extract(field, JsonPathOperator::GetPath, path), SqlType::Jsonb)
    }

    fn document_literal(&self, value: &serde_json::Value) -> Term {
        Term::cast(Term::value(value.to_string()), SqlType::Jsonb)
    }

    fn boolean(&self, field: &Term, path: &[PathSegment]) -> Option<Term> {
        Some(Term::cast(self.text(field, path), SqlType::Boolean))
    }

    fn like(&self, term: Term, pattern: String) -> Criterion {
        Criterion::like_escape(term, Term::value(pattern), '\\')
    }
}

/// `field @> '<json>'`
pub fn postgres_json_contains(field: Term, value: &Value) -> Criterion {
    Criterion::basic(JsonComparator::Contains, field, Term::value(json_text(value)))
}

/// `field <@ '<json>'`
pub fn postgres_json_contained_by(field: Term, value: &Value) -> Criterion {
    Criterion::basic(
        JsonComparator::ContainedBy,
        field,
        Term::value(json_text(value)),
    )
}

/// Path comparisons over `#>>` / `#>`; see [`crate::json`] for the key syntax.
pub fn postgres_json_filter(field: Term, value: &Value) -> Criterion {
    build_json_filter(&PostgresJson, field, value)
}
