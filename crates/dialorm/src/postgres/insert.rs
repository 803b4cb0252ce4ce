use std::collections::BTreeMap;

use crate::model::Model;
use crate::value::Value;

/// Apply the `RETURNING` row of a single-row insert.
///
/// The primary key is assigned when the database generates it and the row
/// carries a non-null value for its column. Other columns are ignored.
pub fn process_insert_result<M: Model>(instance: &mut M, row: &BTreeMap<String, Value>) {
    let meta = M::meta();
    let pk = &meta.pk;

    if !pk.generated {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "dialorm.insert",
            table = meta.table,
            pk = pk.column,
            "primary key is not database generated; nothing to back-fill"
        );
        return;
    }

    match row.get(pk.column) {
        Some(value) if !value.is_null() => {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "dialorm.insert", table = meta.table, pk = pk.column, %value, "assigned primary key");
            instance.set_pk(value.clone());
        }
        _ => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "dialorm.insert",
                table = meta.table,
                pk = pk.column,
                "RETURNING row has no primary key value"
            );
        }
    }
}
