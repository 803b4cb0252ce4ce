use crate::criterion::{Criterion, Equality};
use crate::json::{JsonPathDialect, PathSegment, build_json_filter, json_text};
use crate::term::{SqlType, Term};
use crate::value::Value;

/// Render a MySQL JSON path expression: `$.owner.tags[0]`.
pub fn json_path(path: &[PathSegment]) -> String {
    let mut out = String::from("$");
    for segment in path {
        match segment {
            PathSegment::Index(i) => {
                out.push('[');
                out.push_str(&i.to_string());
                out.push(']');
            }
            PathSegment::Key(key) if is_bare_key(key) => {
                out.push('.');
                out.push_str(key);
            }
            PathSegment::Key(key) => {
                out.push_str(".\"");
                for ch in key.chars() {
                    if matches!(ch, '"' | '\\') {
                        out.push('\\');
                    }
                    out.push(ch);
                }
                out.push('"');
            }
        }
    }
    out
}

fn is_bare_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn extract(field: &Term, path: &[PathSegment]) -> Term {
    Term::function(
        "JSON_EXTRACT",
        vec![field.clone(), Term::value(json_path(path))],
    )
}

struct MySqlJson;

impl JsonPathDialect for MySqlJson {
    fn text(&self, field: &Term, path: &[PathSegment]) -> Term {
        Term::function("JSON_UNQUOTE", vec![extract(field, path)])
    }

    fn number(&self, field: &Term, path: &[PathSegment]) -> Term {
        extract(field, path)
    }

    fn document(&self, field: &Term, path: &[PathSegment]) -> Term {
        extract(field, path)
    }

    fn document_literal(&self, value: &serde_json::Value) -> Term {
        Term::cast(Term::value(value.to_string()), SqlType::Json)
    }

    fn like(&self, term: Term, pattern: String) -> Criterion {
        Criterion::like(term, Term::str(pattern))
    }

    // JSON_UNQUOTE yields the string 'null' for a JSON null, so test the
    // type instead. A missing path gives a NULL type, folded to 'NULL'.
    fn null_check(&self, field: &Term, path: &[PathSegment], negated: bool) -> Criterion {
        let json_type = Term::function(
            "COALESCE",
            vec![
                Term::function("JSON_TYPE", vec![extract(field, path)]),
                Term::value("NULL"),
            ],
        );
        let cmp = if negated { Equality::Ne } else { Equality::Eq };
        Criterion::basic(cmp, json_type, Term::value("NULL"))
    }
}

/// `JSON_CONTAINS(field,'<json>')`: the column contains the given document.
pub fn mysql_json_contains(field: Term, value: &Value) -> Criterion {
    Criterion::Term(Term::function(
        "JSON_CONTAINS",
        vec![field, Term::value(json_text(value))],
    ))
}

/// `JSON_CONTAINS('<json>',field)`: the given document contains the column.
pub fn mysql_json_contained_by(field: Term, value: &Value) -> Criterion {
    Criterion::Term(Term::function(
        "JSON_CONTAINS",
        vec![Term::value(json_text(value)), field],
    ))
}

/// Path comparisons over `JSON_EXTRACT`; see [`crate::json`] for the key syntax.
pub fn mysql_json_filter(field: Term, value: &Value) -> Criterion {
    build_json_filter(&MySqlJson, field, value)
}
