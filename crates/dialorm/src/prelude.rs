//! Convenient imports for typical `dialorm` usage.
//!
//! ```ignore
//! use dialorm::prelude::*;
//! ```

pub use crate::{
    Criterion, Dialect, DialectConfig, Executor, Filter, FilterOp, InsertResult, Model, ModelMeta,
    OrmError, OrmResult, Term, Value,
};
pub use crate::{FieldKind, FieldMeta};
