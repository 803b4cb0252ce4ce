//! # dialorm
//!
//! Dialect-aware filter translation for an ORM layer targeting MySQL and
//! PostgreSQL.
//!
//! ## Features
//!
//! - **Abstract filters**: `exact`, `icontains`, `posix_regex`, `json_filter`, ... as [`FilterOp`]s
//! - **Per-dialect overrides**: static tables replace the backend-neutral builders where a backend differs
//! - **Criterion tree**: builders return [`Criterion`] values; operator text is attached only when rendering
//! - **Safe literals**: every value is quoted by the dialect's [`LiteralRenderer`]
//! - **Insert back-fill**: assign generated primary keys from `LAST_INSERT_ID()` or a `RETURNING` row
//!
//! ## Rendering a filter
//!
//! ```ignore
//! use dialorm::{Dialect, DialectConfig, Executor, Filter, FilterOp};
//!
//! let exec = Executor::new(DialectConfig::new(Dialect::Postgres), &USER);
//! let filter = Filter::new("name", FilterOp::PosixRegex, "^a")?;
//! let sql = exec.where_clause(&[filter])?;
//! assert_eq!(sql, r#""name" ~ '^a'"#);
//! ```
//!
//! ## Using builders directly
//!
//! ```ignore
//! use dialorm::{Dialect, Term, Value, mysql};
//!
//! let c = mysql::mysql_contains(Term::field("name")?, &Value::from("100%"));
//! let sql = Dialect::MySql.renderer().criterion(&c);
//! ```

pub mod config;
pub mod criterion;
pub mod dialect;
pub mod error;
pub mod executor;
pub mod filters;
pub mod ident;
pub mod json;
pub mod model;
pub mod mysql;
pub mod postgres;
pub mod prelude;
pub mod term;
pub mod value;

pub use config::{DialectConfig, MySqlConfig};
pub use criterion::{Comparator, Criterion, Equality};
pub use dialect::{Dialect, LiteralRenderer, MySqlLiterals, PostgresLiterals, SqlRenderer};
pub use error::{OrmError, OrmResult};
pub use executor::{Executor, Filter, InsertResult};
pub use filters::{DEFAULT_FILTERS, FilterFn, FilterOp, FilterOverrides, escape_like};
pub use ident::{Ident, IntoIdent};
pub use json::{JsonFilter, JsonFilterOp, PathSegment};
pub use model::{FieldKind, FieldMeta, Model, ModelMeta};
pub use term::{Field, JsonPathOperator, SqlType, Term};
pub use value::Value;

pub use mysql::{MYSQL_FILTER_OVERRIDES, MySqlRegexpComparator};
pub use postgres::{JsonComparator, POSTGRES_FILTER_OVERRIDES, PostgresRegexMatching};
