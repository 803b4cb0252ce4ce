use crate::model::Model;
use crate::value::Value;

/// Apply the auto-increment id reported after a single-row insert.
///
/// MySQL reports at most one generated row id per statement, so only a
/// database-generated small/regular/big integer primary key can be filled.
/// Any other key (UUIDs, client-assigned integers) must already be set before
/// the insert; for those the instance is left untouched.
pub fn process_insert_result<M: Model>(instance: &mut M, last_insert_id: u64) {
    let meta = M::meta();
    let pk = &meta.pk;

    if !(pk.kind.is_integer() && pk.generated) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "dialorm.insert",
            table = meta.table,
            pk = pk.column,
            kind = ?pk.kind,
            generated = pk.generated,
            "primary key not back-filled from last insert id"
        );
        return;
    }

    let Ok(id) = i64::try_from(last_insert_id) else {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            target: "dialorm.insert",
            table = meta.table,
            last_insert_id,
            "last insert id out of range"
        );
        return;
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(target: "dialorm.insert", table = meta.table, pk = pk.column, id, "assigned primary key");

    instance.set_pk(Value::Int(id));
}
