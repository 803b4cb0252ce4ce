//! Criterion tree for WHERE clauses.
//!
//! A [`Criterion`] is an immutable boolean expression over [`Term`]s. Operator
//! text is never written inline by builders: every comparison carries a
//! [`Comparator`] whose SQL text is looked up only at render time.
//!
//! ```ignore
//! use dialorm::{Criterion, Dialect, Term};
//!
//! let c = Criterion::eq(Term::field("status")?, Term::value("active"));
//! assert_eq!(Dialect::Postgres.renderer().criterion(&c), r#""status"='active'"#);
//! ```

use crate::dialect::SqlRenderer;
use crate::mysql::MySqlRegexpComparator;
use crate::postgres::{JsonComparator, PostgresRegexMatching};
use crate::term::Term;

/// Plain comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Equality {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Equality {
    pub fn as_str(self) -> &'static str {
        match self {
            Equality::Eq => "=",
            Equality::Ne => "<>",
            Equality::Gt => ">",
            Equality::Gte => ">=",
            Equality::Lt => "<",
            Equality::Lte => "<=",
        }
    }
}

/// The operator of a binary criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Equality(Equality),
    MySqlRegexp(MySqlRegexpComparator),
    PostgresRegex(PostgresRegexMatching),
    Json(JsonComparator),
    /// Separator between `MATCH(...)` and `AGAINST(...)`.
    Search,
}

impl Comparator {
    pub fn as_str(self) -> &'static str {
        match self {
            Comparator::Equality(e) => e.as_str(),
            Comparator::MySqlRegexp(c) => c.as_str(),
            Comparator::PostgresRegex(c) => c.as_str(),
            Comparator::Json(c) => c.as_str(),
            Comparator::Search => " ",
        }
    }
}

impl From<Equality> for Comparator {
    fn from(e: Equality) -> Self {
        Comparator::Equality(e)
    }
}

impl From<MySqlRegexpComparator> for Comparator {
    fn from(c: MySqlRegexpComparator) -> Self {
        Comparator::MySqlRegexp(c)
    }
}

impl From<PostgresRegexMatching> for Comparator {
    fn from(c: PostgresRegexMatching) -> Self {
        Comparator::PostgresRegex(c)
    }
}

impl From<JsonComparator> for Comparator {
    fn from(c: JsonComparator) -> Self {
        Comparator::Json(c)
    }
}

/// A SQL boolean expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// `left<op>right`, with the operator text supplied by the comparator.
    Basic {
        comparator: Comparator,
        left: Term,
        right: Term,
    },
    /// `term LIKE pattern [ESCAPE 'c']`
    Like {
        term: Term,
        pattern: Term,
        escape: Option<char>,
    },
    /// `term IS NULL` / `term IS NOT NULL`
    IsNull { term: Term, negated: bool },
    /// `term IN (...)` / `term NOT IN (...)`
    In {
        term: Term,
        values: Vec<Term>,
        negated: bool,
    },
    /// A term that is itself boolean, such as `JSON_CONTAINS(...)`.
    Term(Term),
    And(Vec<Criterion>),
    Or(Vec<Criterion>),
    Not(Box<Criterion>),
}

impl Criterion {
    pub fn basic(comparator: impl Into<Comparator>, left: Term, right: Term) -> Self {
        Criterion::Basic {
            comparator: comparator.into(),
            left,
            right,
        }
    }

    pub fn eq(left: Term, right: Term) -> Self {
        Self::basic(Equality::Eq, left, right)
    }

    /// `LIKE` with no `ESCAPE` clause; the server's default escape applies.
    pub fn like(term: Term, pattern: Term) -> Self {
        Criterion::Like {
            term,
            pattern,
            escape: None,
        }
    }

    pub fn like_escape(term: Term, pattern: Term, escape: char) -> Self {
        Criterion::Like {
            term,
            pattern,
            escape: Some(escape),
        }
    }

    pub fn is_null(term: Term) -> Self {
        Criterion::IsNull {
            term,
            negated: false,
        }
    }

    pub fn is_not_null(term: Term) -> Self {
        Criterion::IsNull {
            term,
            negated: true,
        }
    }

    pub fn in_list(term: Term, values: Vec<Term>) -> Self {
        Criterion::In {
            term,
            values,
            negated: false,
        }
    }

    pub fn not_in(term: Term, values: Vec<Term>) -> Self {
        Criterion::In {
            term,
            values,
            negated: true,
        }
    }

    pub fn and(criteria: Vec<Criterion>) -> Self {
        Criterion::And(criteria)
    }

    pub fn or(criteria: Vec<Criterion>) -> Self {
        Criterion::Or(criteria)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(criterion: Criterion) -> Self {
        Criterion::Not(Box::new(criterion))
    }

    /// Check if this criterion contains no conditions.
    pub fn is_empty(&self) -> bool {
        match self {
            Criterion::And(items) | Criterion::Or(items) => items.iter().all(Criterion::is_empty),
            Criterion::Not(inner) => inner.is_empty(),
            _ => false,
        }
    }

    /// Render with the given dialect renderer.
    pub fn to_sql(&self, r: &SqlRenderer) -> String {
        r.criterion(self)
    }

    pub fn write_sql(&self, r: &SqlRenderer, out: &mut String) {
        match self {
            Criterion::Basic {
                comparator,
                left,
                right,
            } => {
                left.write_sql(r, out);
                out.push_str(comparator.as_str());
                right.write_sql(r, out);
            }
            Criterion::Like {
                term,
                pattern,
                escape,
            } => {
                term.write_sql(r, out);
                out.push_str(" LIKE ");
                pattern.write_sql(r, out);
                if let Some(escape) = escape {
                    out.push_str(" ESCAPE ");
                    r.literals().write_str(out, &escape.to_string());
                }
            }
            Criterion::IsNull { term, negated } => {
                term.write_sql(r, out);
                out.push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            Criterion::In {
                term,
                values,
                negated,
            } => {
                if values.is_empty() {
                    // Empty IN list - always false / true
                    out.push_str(if *negated { "1=1" } else { "1=0" });
                    return;
                }
                term.write_sql(r, out);
                out.push_str(if *negated { " NOT IN (" } else { " IN (" });
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    value.write_sql(r, out);
                }
                out.push(')');
            }
            Criterion::Term(term) => term.write_sql(r, out),
            Criterion::And(items) => write_group(r, out, items, " AND "),
            Criterion::Or(items) => write_group(r, out, items, " OR "),
            Criterion::Not(inner) => {
                if inner.is_empty() {
                    return;
                }
                out.push_str("NOT (");
                inner.write_sql(r, out);
                out.push(')');
            }
        }
    }
}

fn write_group(r: &SqlRenderer, out: &mut String, items: &[Criterion], sep: &str) {
    let mut first = true;
    for item in items.iter().filter(|c| !c.is_empty()) {
        if !first {
            out.push_str(sep);
        }
        first = false;
        // Nested groups of the other kind need parentheses.
        let wrap = matches!(item, Criterion::And(_) | Criterion::Or(_));
        if wrap {
            out.push('(');
        }
        item.write_sql(r, out);
        if wrap {
            out.push(')');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    fn f(name: &str) -> Term {
        Term::field(name).unwrap()
    }

    #[test]
    fn equality_renders_without_spaces() {
        let c = Criterion::eq(f("status"), Term::value("active"));
        assert_eq!(Dialect::Postgres.renderer().criterion(&c), r#""status"='active'"#);
    }

    #[test]
    fn like_with_and_without_escape() {
        let c = Criterion::like(f("name"), Term::str("a%"));
        assert_eq!(Dialect::Postgres.renderer().criterion(&c), r#""name" LIKE 'a%'"#);

        let c = Criterion::like_escape(f("name"), Term::value("a%"), '\\');
        assert_eq!(
            Dialect::Postgres.renderer().criterion(&c),
            r#""name" LIKE 'a%' ESCAPE '\'"#
        );
        assert_eq!(
            Dialect::MySql.renderer().criterion(&c),
            r"`name` LIKE 'a%' ESCAPE '\\'"
        );
    }

    #[test]
    fn nested_groups() {
        let c = Criterion::and(vec![
            Criterion::eq(f("status"), Term::value("active")),
            Criterion::or(vec![
                Criterion::eq(f("role"), Term::value("admin")),
                Criterion::is_null(f("role")),
            ]),
        ]);
        assert_eq!(
            Dialect::MySql.renderer().criterion(&c),
            "`status`='active' AND (`role`='admin' OR `role` IS NULL)"
        );
    }

    #[test]
    fn empty_in_lists() {
        let r = Dialect::MySql.renderer();
        assert_eq!(r.criterion(&Criterion::in_list(f("id"), vec![])), "1=0");
        assert_eq!(r.criterion(&Criterion::not_in(f("id"), vec![])), "1=1");
        let c = Criterion::in_list(f("id"), vec![Term::value(1i32), Term::value(2i32)]);
        assert_eq!(r.criterion(&c), "`id` IN (1,2)");
    }

    #[test]
    fn not_and_empty_groups() {
        let r = Dialect::Postgres.renderer();
        let c = Criterion::not(Criterion::eq(f("banned"), Term::value(true)));
        assert_eq!(r.criterion(&c), r#"NOT ("banned"=true)"#);
        assert!(Criterion::and(vec![]).is_empty());
        assert_eq!(r.criterion(&Criterion::not(Criterion::and(vec![]))), "");
    }
}
