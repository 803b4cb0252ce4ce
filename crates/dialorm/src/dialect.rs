//! SQL dialects and literal rendering.
//!
//! A [`Dialect`] knows its identifier quote and EXPLAIN prefix. Literal values
//! are rendered by a [`LiteralRenderer`] selected per dialect, so escaping
//! rules never leak from one backend into another.

use crate::criterion::Criterion;
use crate::term::Term;
use crate::value::Value;
use serde::Deserialize;
use std::fmt;

/// Supported database backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[serde(alias = "mariadb")]
    MySql,
    #[serde(alias = "postgresql", alias = "pg")]
    Postgres,
}

impl Dialect {
    pub fn name(self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::Postgres => "postgres",
        }
    }

    /// Identifier quote character.
    pub fn quote_char(self) -> char {
        match self {
            Dialect::MySql => '`',
            Dialect::Postgres => '"',
        }
    }

    /// Prefix that turns a statement into a JSON query plan request.
    pub fn explain_prefix(self) -> &'static str {
        match self {
            Dialect::MySql => "EXPLAIN FORMAT=JSON",
            Dialect::Postgres => "EXPLAIN (FORMAT JSON, VERBOSE)",
        }
    }

    /// A renderer with this dialect's default literal rules.
    pub fn renderer(self) -> SqlRenderer {
        match self {
            Dialect::MySql => SqlRenderer::new(self, Box::new(MySqlLiterals::default())),
            Dialect::Postgres => SqlRenderer::new(self, Box::new(PostgresLiterals)),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renders literal values as quoted SQL text for one dialect.
pub trait LiteralRenderer: fmt::Debug + Send + Sync {
    /// Write `value` as a complete string literal, quotes included.
    fn write_str(&self, out: &mut String, value: &str);

    /// Whether a backslash inside a string literal starts an escape sequence.
    fn backslash_escapes(&self) -> bool {
        false
    }

    fn write_value(&self, out: &mut String, value: &Value) {
        match value {
            Value::Null => out.push_str("NULL"),
            Value::Bool(true) => out.push_str("true"),
            Value::Bool(false) => out.push_str("false"),
            Value::Int(i) => out.push_str(&i.to_string()),
            Value::UInt(u) => out.push_str(&u.to_string()),
            Value::Float(f) if f.is_finite() => out.push_str(&f.to_string()),
            Value::Float(f) => self.write_str(out, &f.to_string()),
            Value::Str(s) => self.write_str(out, s),
            Value::Json(j) => self.write_str(out, &j.to_string()),
            Value::Uuid(_) | Value::Date(_) | Value::DateTime(_) => {
                self.write_str(out, &value.to_text())
            }
            Value::List(items) => {
                out.push('(');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    self.write_value(out, item);
                }
                out.push(')');
            }
        }
    }
}

/// MySQL string literals.
///
/// With `backslash_escapes` (the server default) the text is escaped the way
/// `mysql_real_escape_string` does it. Under `NO_BACKSLASH_ESCAPES` only the
/// quote is doubled.
#[derive(Debug, Clone, Copy)]
pub struct MySqlLiterals {
    pub backslash_escapes: bool,
}

impl Default for MySqlLiterals {
    fn default() -> Self {
        Self {
            backslash_escapes: true,
        }
    }
}

impl LiteralRenderer for MySqlLiterals {
    fn write_str(&self, out: &mut String, value: &str) {
        out.reserve(value.len() + 2);
        out.push('\'');
        if self.backslash_escapes {
            for ch in value.chars() {
                match ch {
                    '\0' => out.push_str("\\0"),
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    '\x1a' => out.push_str("\\Z"),
                    '\\' => out.push_str("\\\\"),
                    '\'' => out.push_str("\\'"),
                    '"' => out.push_str("\\\""),
                    c => out.push(c),
                }
            }
        } else {
            push_doubling(out, value, '\'');
        }
        out.push('\'');
    }

    fn backslash_escapes(&self) -> bool {
        self.backslash_escapes
    }
}

/// PostgreSQL string literals (`standard_conforming_strings = on`).
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresLiterals;

impl LiteralRenderer for PostgresLiterals {
    fn write_str(&self, out: &mut String, value: &str) {
        out.reserve(value.len() + 2);
        out.push('\'');
        push_doubling(out, value, '\'');
        out.push('\'');
    }
}

pub(crate) fn push_doubling(out: &mut String, value: &str, quote: char) {
    for ch in value.chars() {
        if ch == quote {
            out.push(quote);
        }
        out.push(ch);
    }
}

/// Renders criteria and terms for one dialect.
#[derive(Debug)]
pub struct SqlRenderer {
    dialect: Dialect,
    literals: Box<dyn LiteralRenderer>,
}

impl SqlRenderer {
    pub fn new(dialect: Dialect, literals: Box<dyn LiteralRenderer>) -> Self {
        Self { dialect, literals }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn quote_char(&self) -> char {
        self.dialect.quote_char()
    }

    /// Quote used for string literals.
    pub fn secondary_quote_char(&self) -> char {
        '\''
    }

    pub fn literals(&self) -> &dyn LiteralRenderer {
        self.literals.as_ref()
    }

    /// Render a criterion to SQL text.
    pub fn criterion(&self, criterion: &Criterion) -> String {
        let mut out = String::new();
        criterion.write_sql(self, &mut out);
        out
    }

    /// Render a term to SQL text.
    pub fn term(&self, term: &Term) -> String {
        let mut out = String::new();
        term.write_sql(self, &mut out);
        out
    }
}
