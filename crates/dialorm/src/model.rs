//! Model metadata consumed by filters and insert-result handlers.
//!
//! Metadata is `'static` and const-constructible, the shape a derive macro
//! would emit:
//!
//! ```ignore
//! use dialorm::model::{FieldKind, FieldMeta, ModelMeta};
//!
//! static USER: ModelMeta = ModelMeta::new(
//!     "users",
//!     FieldMeta::new("id", FieldKind::BigInt).generated(),
//!     &[FieldMeta::new("name", FieldKind::Char), FieldMeta::new("data", FieldKind::Json)],
//! );
//! ```

use crate::value::Value;

/// Declared type of a model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    SmallInt,
    Int,
    BigInt,
    Float,
    Decimal,
    Bool,
    Char,
    Text,
    Uuid,
    Date,
    DateTime,
    Json,
}

impl FieldKind {
    /// Small, regular and big integers: the kinds an auto-increment id can fill.
    pub fn is_integer(self) -> bool {
        matches!(self, FieldKind::SmallInt | FieldKind::Int | FieldKind::BigInt)
    }
}

/// One field of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    pub column: &'static str,
    pub kind: FieldKind,
    /// The database produces the value on insert.
    pub generated: bool,
}

impl FieldMeta {
    pub const fn new(column: &'static str, kind: FieldKind) -> Self {
        Self {
            column,
            kind,
            generated: false,
        }
    }

    pub const fn generated(mut self) -> Self {
        self.generated = true;
        self
    }
}

/// Table-level metadata.
#[derive(Debug, Clone, Copy)]
pub struct ModelMeta {
    pub table: &'static str,
    pub pk: FieldMeta,
    /// Non-key fields.
    pub fields: &'static [FieldMeta],
}

impl ModelMeta {
    pub const fn new(table: &'static str, pk: FieldMeta, fields: &'static [FieldMeta]) -> Self {
        Self { table, pk, fields }
    }

    /// Look up a field by column name, including the primary key.
    pub fn field(&self, column: &str) -> Option<&FieldMeta> {
        if self.pk.column == column {
            return Some(&self.pk);
        }
        self.fields.iter().find(|f| f.column == column)
    }
}

/// An in-memory record of a model.
pub trait Model {
    fn meta() -> &'static ModelMeta;

    /// Current primary key; `Value::Null` until assigned.
    fn pk(&self) -> Value;

    fn set_pk(&mut self, pk: Value);
}

#[cfg(test)]
mod tests {
    use super::*;

    static EVENTS: ModelMeta = ModelMeta::new(
        "events",
        FieldMeta::new("id", FieldKind::Int).generated(),
        &[
            FieldMeta::new("name", FieldKind::Text),
            FieldMeta::new("payload", FieldKind::Json),
        ],
    );

    #[test]
    fn lookup_fields() {
        assert_eq!(EVENTS.field("id").map(|f| f.kind), Some(FieldKind::Int));
        assert_eq!(EVENTS.field("payload").map(|f| f.kind), Some(FieldKind::Json));
        assert!(EVENTS.field("missing").is_none());
        assert!(EVENTS.pk.generated);
    }

    #[test]
    fn integer_kinds() {
        assert!(FieldKind::SmallInt.is_integer());
        assert!(FieldKind::BigInt.is_integer());
        assert!(!FieldKind::Uuid.is_integer());
        assert!(!FieldKind::Decimal.is_integer());
    }
}
