//! Transaction-scoped primitives
//!
//! Each function runs against whatever transaction the caller holds, so a
//! composed operation can chain several of them in one unit of work.
//! Arguments are validated against the kind before any SQL runs.

use evplan_core::errors::{ExError, ExErrorKind};
use evplan_core::model::{Fields, Filter, Identified, Kind, Value};
use rusqlite::{params_from_iter, Connection, OptionalExtension};

use crate::errors::{from_rusqlite, Result};
use crate::repo::sql::{columns, order_clause, set_clause, where_clause, SqlValue};
use crate::repo::Entity;

/// Load one record by surrogate id
pub fn find_by_id_tx<K: Entity + Identified>(conn: &Connection, id: i64) -> Result<Option<K>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE id = ?1",
        columns::<K>(),
        K::TABLE
    );
    conn.query_row(&sql, [id], |row| K::from_row(row))
        .optional()
        .map_err(from_rusqlite)
}

/// First record matching `filter`
///
/// Ties are broken by the filter's sort keys, then by storage order.
pub fn find_one_tx<K: Entity>(conn: &Connection, filter: &Filter) -> Result<Option<K>> {
    K::check_filter(filter)?;
    let mut params = Vec::new();
    let sql = format!(
        "SELECT {} FROM {}{}{} LIMIT 1",
        columns::<K>(),
        K::TABLE,
        where_clause(filter.conditions(), &mut params),
        order_clause(filter)
    );
    conn.query_row(&sql, params_from_iter(params.into_iter().map(SqlValue)), |row| {
        K::from_row(row)
    })
    .optional()
    .map_err(from_rusqlite)
}

/// Every record matching `filter`
pub fn find_all_tx<K: Entity>(conn: &Connection, filter: &Filter) -> Result<Vec<K>> {
    K::check_filter(filter)?;
    let mut params = Vec::new();
    let sql = format!(
        "SELECT {} FROM {}{}{}",
        columns::<K>(),
        K::TABLE,
        where_clause(filter.conditions(), &mut params),
        order_clause(filter)
    );
    let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
    let records = stmt
        .query_map(params_from_iter(params.into_iter().map(SqlValue)), |row| {
            K::from_row(row)
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(records)
}

/// Insert a record and read it back as stored
pub fn add_tx<K: Entity>(conn: &Connection, fields: &Fields) -> Result<K> {
    K::check_insert(fields)?;
    let sql = if fields.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES", K::TABLE)
    } else {
        let names: Vec<&str> = fields.names().collect();
        let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{}", i)).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            K::TABLE,
            names.join(", "),
            placeholders.join(", ")
        )
    };
    conn.execute(&sql, params_from_iter(fields.iter().map(|(_, v)| SqlValue(v))))
        .map_err(from_rusqlite)?;

    // Join records have no surrogate id, but every table keeps a rowid
    let rowid = conn.last_insert_rowid();
    let sql = format!(
        "SELECT {} FROM {} WHERE rowid = ?1",
        columns::<K>(),
        K::TABLE
    );
    conn.query_row(&sql, [rowid], |row| K::from_row(row))
        .map_err(from_rusqlite)
}

/// Apply a partial update to one record
///
/// Returns the refreshed record, or `None` when no record has `id`. An empty
/// field set changes nothing and returns the current record.
pub fn update_tx<K: Entity + Identified>(
    conn: &Connection,
    id: i64,
    fields: &Fields,
) -> Result<Option<K>> {
    K::check_update(fields)?;
    if fields.is_empty() {
        return find_by_id_tx(conn, id);
    }

    let id_value = Value::Integer(id);
    let mut params = Vec::new();
    let set = set_clause(fields, &mut params);
    params.push(&id_value);
    let sql = format!(
        "UPDATE {} SET {} WHERE id = ?{}",
        K::TABLE,
        set,
        params.len()
    );
    let changed = conn
        .execute(&sql, params_from_iter(params.into_iter().map(SqlValue)))
        .map_err(from_rusqlite)?;

    if changed == 0 {
        return Ok(None);
    }
    find_by_id_tx(conn, id)
}

/// Apply a partial update to every record matching `filter`
///
/// Used for join records, whose key is composite. Returns the rows changed.
pub fn update_where_tx<K: Kind>(conn: &Connection, filter: &Filter, fields: &Fields) -> Result<usize> {
    K::check_filter(filter)?;
    K::check_update(fields)?;
    if fields.is_empty() {
        return count_tx::<K>(conn, filter).map(|n| n as usize);
    }

    let mut params = Vec::new();
    let set = set_clause(fields, &mut params);
    let sql = format!(
        "UPDATE {} SET {}{}",
        K::TABLE,
        set,
        where_clause(filter.conditions(), &mut params)
    );
    conn.execute(&sql, params_from_iter(params.into_iter().map(SqlValue)))
        .map_err(from_rusqlite)
}

/// Remove one record; false when it did not exist
pub fn delete_tx<K: Identified>(conn: &Connection, id: i64) -> Result<bool> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", K::TABLE);
    let removed = conn.execute(&sql, [id]).map_err(from_rusqlite)?;
    Ok(removed > 0)
}

/// Remove every record matching `filter`; returns the rows removed
///
/// A filter without conditions is rejected rather than clearing the table.
pub fn delete_where_tx<K: Kind>(conn: &Connection, filter: &Filter) -> Result<usize> {
    K::check_filter(filter)?;
    if filter.conditions().is_empty() {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_record_kind(K::NAME)
            .with_message("delete_where requires at least one condition"));
    }
    let mut params = Vec::new();
    let sql = format!(
        "DELETE FROM {}{}",
        K::TABLE,
        where_clause(filter.conditions(), &mut params)
    );
    conn.execute(&sql, params_from_iter(params.into_iter().map(SqlValue)))
        .map_err(from_rusqlite)
}

/// Number of records matching `filter`
pub fn count_tx<K: Kind>(conn: &Connection, filter: &Filter) -> Result<u64> {
    K::check_filter(filter)?;
    let mut params = Vec::new();
    let sql = format!(
        "SELECT COUNT(*) FROM {}{}",
        K::TABLE,
        where_clause(filter.conditions(), &mut params)
    );
    let count: i64 = conn
        .query_row(&sql, params_from_iter(params.into_iter().map(SqlValue)), |row| {
            row.get(0)
        })
        .map_err(from_rusqlite)?;
    Ok(u64::try_from(count).unwrap_or_default())
}
