//! Statement building
//!
//! Column names are interpolated only after they were checked against the
//! kind's declared fields; values are always bound as parameters.

use evplan_core::model::{Fields, Filter, Kind, Value};
use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlOwned, ValueRef};

/// Binds a model `Value` as a statement parameter
pub(crate) struct SqlValue<'a>(pub(crate) &'a Value);

impl ToSql for SqlValue<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.0 {
            Value::Null => ToSqlOutput::Owned(SqlOwned::Null),
            Value::Bool(b) => ToSqlOutput::Owned(SqlOwned::Integer(i64::from(*b))),
            Value::Integer(n) => ToSqlOutput::Owned(SqlOwned::Integer(*n)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Date(d) => ToSqlOutput::Owned(SqlOwned::Text(d.format("%Y-%m-%d").to_string())),
        })
    }
}

/// Select list of every declared field
pub(crate) fn columns<K: Kind>() -> String {
    K::FIELDS
        .iter()
        .map(|f| f.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `WHERE` clause for exact-match conditions
///
/// Null conditions become `IS NULL`; other values are appended to `params`
/// and referenced by position.
pub(crate) fn where_clause<'a>(conditions: &'a Fields, params: &mut Vec<&'a Value>) -> String {
    if conditions.is_empty() {
        return String::new();
    }
    let terms: Vec<String> = conditions
        .iter()
        .map(|(name, value)| {
            if value.is_null() {
                format!("{} IS NULL", name)
            } else {
                params.push(value);
                format!("{} = ?{}", name, params.len())
            }
        })
        .collect();
    format!(" WHERE {}", terms.join(" AND "))
}

/// `ORDER BY` clause; rowid always breaks remaining ties
pub(crate) fn order_clause(filter: &Filter) -> String {
    let mut keys: Vec<String> = filter
        .order()
        .iter()
        .map(|(name, order)| format!("{} {}", name, order.as_sql()))
        .collect();
    keys.push("rowid ASC".to_string());
    format!(" ORDER BY {}", keys.join(", "))
}

/// `SET` clause for a partial update; values are appended to `params`
pub(crate) fn set_clause<'a>(fields: &'a Fields, params: &mut Vec<&'a Value>) -> String {
    fields
        .iter()
        .map(|(name, value)| {
            params.push(value);
            format!("{} = ?{}", name, params.len())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use evplan_core::model::{Event, SortOrder};

    #[test]
    fn test_where_clause_binds_in_order() {
        let conditions = Fields::new()
            .with("owner_id", 3_i64)
            .with("location", Value::Null)
            .with("title", "Свадьба");
        let mut params = Vec::new();
        let clause = where_clause(&conditions, &mut params);
        assert_eq!(clause, " WHERE location IS NULL AND owner_id = ?1 AND title = ?2");
        assert_eq!(params, vec![&Value::Integer(3), &Value::Text("Свадьба".to_string())]);
    }

    #[test]
    fn test_empty_conditions_have_no_where() {
        let empty = Fields::new();
        let mut params = Vec::new();
        assert_eq!(where_clause(&empty, &mut params), "");
        assert!(params.is_empty());
    }

    #[test]
    fn test_order_clause_ends_with_rowid() {
        assert_eq!(order_clause(&Filter::new()), " ORDER BY rowid ASC");
        let filter = Filter::new().order_by("date", SortOrder::Desc);
        assert_eq!(order_clause(&filter), " ORDER BY date DESC, rowid ASC");
    }

    #[test]
    fn test_columns_follow_declaration() {
        assert_eq!(columns::<Event>(), "id, owner_id, title, location, date");
    }
}
