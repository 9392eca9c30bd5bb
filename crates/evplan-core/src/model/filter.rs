//! Exact-match filters with optional explicit sort

use crate::model::{Fields, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Field → value conditions, all of which must match
///
/// `Value::Null` matches rows where the field `IS NULL`. Without an explicit
/// sort, results come back in storage (insertion) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Fields,
    order: Vec<(String, SortOrder)>,
}

impl Filter {
    /// Match-everything filter
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.set(field, value);
        self
    }

    /// Append a sort key; earlier keys take precedence
    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.order.push((field.into(), order));
        self
    }

    pub fn conditions(&self) -> &Fields {
        &self.conditions
    }

    pub fn order(&self) -> &[(String, SortOrder)] {
        &self.order
    }
}

impl From<Fields> for Filter {
    fn from(conditions: Fields) -> Self {
        Self {
            conditions,
            order: Vec::new(),
        }
    }
}
