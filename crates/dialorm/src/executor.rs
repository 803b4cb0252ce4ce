//! Per-model executor facade: resolves filter operators for the configured
//! dialect, renders WHERE clauses and applies insert results.
//!
//! ```ignore
//! use dialorm::{Dialect, DialectConfig, Executor};
//!
//! let exec = Executor::for_model::<User>(DialectConfig::new(Dialect::MySql));
//! let filters = [
//!     exec.parse_filter("name__icontains", "ali")?,
//!     exec.parse_filter("id__gte", 10)?,
//! ];
//! let sql = exec.where_clause(&filters)?;
//! // UPPER(CAST(`name` AS CHAR)) LIKE UPPER('%ali%') AND `id`>=10
//! ```

use std::collections::BTreeMap;

use crate::config::DialectConfig;
use crate::criterion::Criterion;
use crate::dialect::{Dialect, SqlRenderer};
use crate::error::{OrmError, OrmResult};
use crate::filters::{DEFAULT_FILTERS, FilterFn, FilterOp, FilterOverrides};
use crate::ident::IntoIdent;
use crate::json::JsonFilter;
use crate::model::{FieldKind, Model, ModelMeta};
use crate::term::{Field, Term};
use crate::value::Value;
use crate::{mysql, postgres};

/// One `field <op> value` predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: Field,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl IntoIdent, op: FilterOp, value: impl Into<Value>) -> OrmResult<Self> {
        Ok(Self {
            field: Field::new(field)?,
            op,
            value: value.into(),
        })
    }

    /// Parse a keyword filter such as `name__icontains` or `id__in`.
    ///
    /// A key without a recognised lookup suffix is an exact match on the
    /// whole key.
    pub fn parse(key: &str, value: impl Into<Value>) -> OrmResult<Self> {
        let (column, op) = match key.rsplit_once("__") {
            Some((column, lookup)) => match FilterOp::from_lookup(lookup) {
                Some(op) => (column, op),
                None => (key, FilterOp::Exact),
            },
            None => (key, FilterOp::Exact),
        };
        if column.is_empty() {
            return Err(OrmError::validation(format!(
                "Filter key '{key}' has no field name"
            )));
        }
        Self::new(column, op, value)
    }
}

/// What the driver reported for a completed single-row insert.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertResult {
    /// MySQL `LAST_INSERT_ID()`.
    LastInsertId(u64),
    /// PostgreSQL `RETURNING` row, column name to value.
    Returning(BTreeMap<String, Value>),
}

/// Filter resolution and SQL rendering for one model and dialect.
#[derive(Debug)]
pub struct Executor {
    config: DialectConfig,
    renderer: SqlRenderer,
    meta: &'static ModelMeta,
}

impl Executor {
    pub fn new(config: DialectConfig, meta: &'static ModelMeta) -> Self {
        Self {
            renderer: config.renderer(),
            config,
            meta,
        }
    }

    pub fn for_model<M: Model>(config: DialectConfig) -> Self {
        Self::new(config, M::meta())
    }

    pub fn dialect(&self) -> Dialect {
        self.config.dialect
    }

    pub fn config(&self) -> &DialectConfig {
        &self.config
    }

    pub fn meta(&self) -> &'static ModelMeta {
        self.meta
    }

    pub fn renderer(&self) -> &SqlRenderer {
        &self.renderer
    }

    /// The dialect's override table.
    pub fn overrides(&self) -> &'static FilterOverrides {
        match self.config.dialect {
            Dialect::MySql => &mysql::MYSQL_FILTER_OVERRIDES,
            Dialect::Postgres => &postgres::POSTGRES_FILTER_OVERRIDES,
        }
    }

    /// Resolve the builder for an operator: dialect override, then default.
    pub fn filter_fn(&self, op: FilterOp) -> OrmResult<FilterFn> {
        if let Some(build) = self.overrides().get(op) {
            #[cfg(feature = "tracing")]
            tracing::trace!(target: "dialorm.filter", dialect = %self.dialect(), %op, "using dialect override");
            return Ok(build);
        }
        if let Some(build) = DEFAULT_FILTERS.get(op) {
            #[cfg(feature = "tracing")]
            tracing::trace!(target: "dialorm.filter", dialect = %self.dialect(), %op, "using default builder");
            return Ok(build);
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "dialorm.filter", dialect = %self.dialect(), %op, "unsupported");
        Err(OrmError::unsupported(op, self.dialect()))
    }

    /// Parse a keyword filter against this model.
    ///
    /// The field must exist on the model. On JSON fields `contains` means
    /// document containment rather than substring matching.
    pub fn parse_filter(&self, key: &str, value: impl Into<Value>) -> OrmResult<Filter> {
        let mut filter = Filter::parse(key, value)?;
        let column = filter.field.name();
        let Some(meta) = self.meta.field(column) else {
            return Err(OrmError::validation(format!(
                "Unknown field '{column}' on {}",
                self.meta.table
            )));
        };
        if meta.kind == FieldKind::Json && filter.op == FilterOp::Contains {
            filter.op = FilterOp::JsonContains;
        }
        Ok(filter)
    }

    /// Build the criterion for one filter.
    pub fn build_filter(&self, filter: &Filter) -> OrmResult<Criterion> {
        let build = self.filter_fn(filter.op)?;
        if filter.op == FilterOp::JsonFilter {
            JsonFilter::parse_all(&filter.value)?;
        }
        Ok(build(Term::Field(filter.field.clone()), &filter.value))
    }

    /// AND of all filters.
    pub fn criterion(&self, filters: &[Filter]) -> OrmResult<Criterion> {
        let criteria = filters
            .iter()
            .map(|f| self.build_filter(f))
            .collect::<OrmResult<Vec<_>>>()?;
        Ok(Criterion::and(criteria))
    }

    /// Render the AND of all filters; empty when there are none.
    pub fn where_clause(&self, filters: &[Filter]) -> OrmResult<String> {
        Ok(self.renderer.criterion(&self.criterion(filters)?))
    }

    /// Wrap a statement in the dialect's JSON query plan request.
    pub fn explain(&self, sql: &str) -> String {
        format!("{} {sql}", self.dialect().explain_prefix())
    }

    /// Apply an insert result to the instance through the dialect's handler.
    pub fn process_insert_result<M: Model>(
        &self,
        instance: &mut M,
        result: &InsertResult,
    ) -> OrmResult<()> {
        match (self.dialect(), result) {
            (Dialect::MySql, InsertResult::LastInsertId(id)) => {
                mysql::process_insert_result(instance, *id);
                Ok(())
            }
            (Dialect::Postgres, InsertResult::Returning(row)) => {
                postgres::process_insert_result(instance, row);
                Ok(())
            }
            (dialect, other) => Err(OrmError::validation(format!(
                "{dialect} cannot process insert result {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldMeta;

    static ARTICLE: ModelMeta = ModelMeta::new(
        "articles",
        FieldMeta::new("id", FieldKind::BigInt).generated(),
        &[
            FieldMeta::new("title", FieldKind::Char),
            FieldMeta::new("meta", FieldKind::Json),
        ],
    );

    fn exec(dialect: Dialect) -> Executor {
        Executor::new(DialectConfig::new(dialect), &ARTICLE)
    }

    #[test]
    fn parse_lookup_suffixes() {
        let f = Filter::parse("title__icontains", "x").unwrap();
        assert_eq!(f.field.name(), "title");
        assert_eq!(f.op, FilterOp::InsensitiveContains);

        let f = Filter::parse("title", "x").unwrap();
        assert_eq!(f.op, FilterOp::Exact);

        // Unknown suffix: the whole key is the field.
        let f = Filter::parse("created__year", 2024).unwrap();
        assert_eq!(f.field.name(), "created__year");
        assert_eq!(f.op, FilterOp::Exact);

        assert!(Filter::parse("__gt", 1).unwrap_err().is_validation());
    }

    #[test]
    fn parse_filter_checks_model_fields() {
        let e = exec(Dialect::MySql);
        assert!(e.parse_filter("missing__gt", 1).unwrap_err().is_validation());
        let f = e.parse_filter("meta__contains", serde_json::json!({"a": 1})).unwrap();
        assert_eq!(f.op, FilterOp::JsonContains);
        let f = e.parse_filter("title__contains", "a").unwrap();
        assert_eq!(f.op, FilterOp::Contains);
    }

    #[test]
    fn resolution_order() {
        let e = exec(Dialect::MySql);
        let title = || Term::field("title").unwrap();
        let v = Value::from("x");
        let build = e.filter_fn(FilterOp::Contains).unwrap();
        assert_eq!(build(title(), &v), mysql::mysql_contains(title(), &v));
        let build = e.filter_fn(FilterOp::Exact).unwrap();
        assert_eq!(build(title(), &v), crate::filters::exact(title(), &v));

        let e = exec(Dialect::Postgres);
        let build = e.filter_fn(FilterOp::Contains).unwrap();
        assert_eq!(build(title(), &v), crate::filters::contains(title(), &v));
    }

    #[test]
    fn unsupported_operators() {
        let err = exec(Dialect::MySql)
            .filter_fn(FilterOp::InsensitivePosixRegex)
            .unwrap_err();
        assert!(err.is_unsupported());
        assert_eq!(
            err.to_string(),
            "Filter 'insensitive_posix_regex' is not supported by mysql"
        );
        assert!(exec(Dialect::Postgres).filter_fn(FilterOp::Search).unwrap_err().is_unsupported());
    }

    #[test]
    fn json_filter_is_validated() {
        let e = exec(Dialect::Postgres);
        let bad = Filter::new("meta", FilterOp::JsonFilter, "not an object").unwrap();
        assert!(e.build_filter(&bad).unwrap_err().is_validation());
    }

    #[test]
    fn explain_prefixes() {
        assert_eq!(
            exec(Dialect::MySql).explain("SELECT 1"),
            "EXPLAIN FORMAT=JSON SELECT 1"
        );
        assert_eq!(
            exec(Dialect::Postgres).explain("SELECT 1"),
            "EXPLAIN (FORMAT JSON, VERBOSE) SELECT 1"
        );
    }

    #[test]
    fn where_clause_joins_with_and() {
        let e = exec(Dialect::Postgres);
        let filters = [
            e.parse_filter("title__istartswith", "ab").unwrap(),
            e.parse_filter("id__in", vec![1, 2]).unwrap(),
        ];
        assert_eq!(
            e.where_clause(&filters).unwrap(),
            r#"UPPER(CAST("title" AS VARCHAR)) LIKE UPPER('ab%') ESCAPE '\' AND "id" IN (1,2)"#
        );
        assert_eq!(e.where_clause(&[]).unwrap(), "");
    }

    #[test]
    fn executor_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Executor>();
    }
}
