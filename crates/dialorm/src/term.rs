//! Terms: the operands of a criterion.

use crate::dialect::SqlRenderer;
use crate::error::OrmResult;
use crate::ident::{Ident, IntoIdent};
use crate::value::Value;

/// A column reference inside a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    ident: Ident,
}

impl Field {
    /// Create a field from a column name, optionally table-qualified (`users.name`).
    pub fn new(name: impl IntoIdent) -> OrmResult<Self> {
        Ok(Self {
            ident: name.into_ident()?,
        })
    }

    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    /// The unqualified column name.
    pub fn name(&self) -> &str {
        self.ident.name()
    }

    /// Wrap a constant the way this field wraps its comparison operands:
    /// through the dialect's default literal renderer.
    pub fn wrap_constant(&self, value: impl Into<Value>) -> Term {
        Term::Value(value.into())
    }
}

impl From<Field> for Term {
    fn from(field: Field) -> Self {
        Term::Field(field)
    }
}

/// Target types for `CAST(... AS type)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    Char,
    Varchar,
    Text,
    Signed,
    Numeric,
    Boolean,
    Json,
    Jsonb,
}

impl SqlType {
    pub fn as_str(self) -> &'static str {
        match self {
            SqlType::Char => "CHAR",
            SqlType::Varchar => "VARCHAR",
            SqlType::Text => "TEXT",
            SqlType::Signed => "SIGNED",
            SqlType::Numeric => "NUMERIC",
            SqlType::Boolean => "BOOLEAN",
            SqlType::Json => "JSON",
            SqlType::Jsonb => "JSONB",
        }
    }
}

/// PostgreSQL JSON path extraction operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonPathOperator {
    /// `#>`: extract the sub-document at a path.
    GetPath,
    /// `#>>`: extract the value at a path as text.
    GetPathText,
}

impl JsonPathOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            JsonPathOperator::GetPath => "#>",
            JsonPathOperator::GetPathText => "#>>",
        }
    }
}

/// An operand inside a criterion.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// A column reference.
    Field(Field),
    /// A literal rendered by the dialect's default literal renderer.
    Value(Value),
    /// A string wrapped by quote doubling only, bypassing the default renderer.
    ///
    /// When the dialect treats backslashes as escapes they are doubled too,
    /// otherwise `\'` would end the literal early.
    Str(String),
    /// `CAST(term AS type)`
    Cast(Box<Term>, SqlType),
    /// `NAME(arg,arg[ suffix])`
    Function {
        name: &'static str,
        args: Vec<Term>,
        suffix: Option<&'static str>,
    },
    /// `term#>path` / `term#>>path`
    JsonPath {
        term: Box<Term>,
        op: JsonPathOperator,
        path: Box<Term>,
    },
}

impl Term {
    pub fn field(name: impl IntoIdent) -> OrmResult<Self> {
        Field::new(name).map(Term::Field)
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Term::Value(value.into())
    }

    pub fn str(value: impl Into<String>) -> Self {
        Term::Str(value.into())
    }

    pub fn cast(term: Term, ty: SqlType) -> Self {
        Term::Cast(Box::new(term), ty)
    }

    pub fn upper(term: Term) -> Self {
        Term::function("UPPER", vec![term])
    }

    pub fn function(name: &'static str, args: Vec<Term>) -> Self {
        Term::Function {
            name,
            args,
            suffix: None,
        }
    }

    pub fn json_path(term: Term, op: JsonPathOperator, path: Term) -> Self {
        Term::JsonPath {
            term: Box::new(term),
            op,
            path: Box::new(path),
        }
    }

    pub fn write_sql(&self, r: &SqlRenderer, out: &mut String) {
        match self {
            Term::Field(field) => field.ident.write_sql(out, r.quote_char()),
            Term::Value(value) => r.literals().write_value(out, value),
            Term::Str(s) => {
                let quote = r.secondary_quote_char();
                let backslashes = r.literals().backslash_escapes();
                out.reserve(s.len() + 2);
                out.push(quote);
                for ch in s.chars() {
                    if ch == quote || (backslashes && ch == '\\') {
                        out.push(ch);
                    }
                    out.push(ch);
                }
                out.push(quote);
            }
            Term::Cast(inner, ty) => {
                out.push_str("CAST(");
                inner.write_sql(r, out);
                out.push_str(" AS ");
                out.push_str(ty.as_str());
                out.push(')');
            }
            Term::Function { name, args, suffix } => {
                out.push_str(name);
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    arg.write_sql(r, out);
                }
                if let Some(suffix) = suffix {
                    out.push(' ');
                    out.push_str(suffix);
                }
                out.push(')');
            }
            Term::JsonPath { term, op, path } => {
                term.write_sql(r, out);
                out.push_str(op.as_str());
                path.write_sql(r, out);
            }
        }
    }
}
