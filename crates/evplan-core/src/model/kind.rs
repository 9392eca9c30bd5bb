//! Record kind metadata
//!
//! A kind is the schema identity of a record (its table, declared fields and
//! key). The store is generic over `Kind`; nothing in it is kind-specific.

use crate::errors::EvplanError;
use crate::model::{Fields, Filter, Value};

/// Text input standing for the string `null` rather than a null value
const NULL_ESCAPE: &str = "\\null";

/// Declared type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Text,
    Bool,
    /// Calendar date, stored as `YYYY-MM-DD`
    Date,
}

impl FieldType {
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Text => "text",
            FieldType::Bool => "bool",
            FieldType::Date => "date",
        }
    }

    /// Parse textual input into a value of this type
    ///
    /// The literal `null` yields `Value::Null`; nullability is checked later
    /// against the field definition. A text field takes `\null` for the
    /// four-character string `null`.
    pub fn parse(&self, field: &str, raw: &str) -> Result<Value, EvplanError> {
        if raw == "null" {
            return Ok(Value::Null);
        }
        let invalid = |reason: String| EvplanError::InvalidValue {
            field: field.to_string(),
            reason,
        };
        match self {
            FieldType::Integer => raw
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|e| invalid(e.to_string())),
            FieldType::Text if raw == NULL_ESCAPE => Ok(Value::Text("null".to_string())),
            FieldType::Text => Ok(Value::Text(raw.to_string())),
            FieldType::Bool => match raw {
                "true" | "1" | "yes" => Ok(Value::Bool(true)),
                "false" | "0" | "no" => Ok(Value::Bool(false)),
                other => Err(invalid(format!("expected a boolean, got '{}'", other))),
            },
            FieldType::Date => chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|e| invalid(format!("expected YYYY-MM-DD: {}", e))),
        }
    }
}

/// One declared field of a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub ty: FieldType,
    pub nullable: bool,
}

impl FieldDef {
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            nullable: false,
        }
    }

    pub const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            nullable: true,
        }
    }

    /// Whether `value` fits this field's type and nullability
    pub fn accepts(&self, value: &Value) -> bool {
        match value {
            Value::Null => self.nullable,
            Value::Integer(_) => self.ty == FieldType::Integer,
            Value::Text(_) => self.ty == FieldType::Text,
            Value::Bool(_) => self.ty == FieldType::Bool,
            Value::Date(_) => self.ty == FieldType::Date,
        }
    }
}

/// Schema identity of a record type
pub trait Kind: Sized + Send + 'static {
    /// Human-readable kind name, e.g. `event`
    const NAME: &'static str;
    /// Backing table
    const TABLE: &'static str;
    /// Declared field set, key fields included
    const FIELDS: &'static [FieldDef];
    /// Primary-key fields (one surrogate id, or the composite of a join record)
    const KEY: &'static [&'static str];
    /// True when the store assigns the key on insert
    const GENERATED_KEY: bool = false;

    fn field(name: &str) -> Option<&'static FieldDef> {
        Self::FIELDS.iter().find(|f| f.name == name)
    }

    fn is_key(name: &str) -> bool {
        Self::KEY.contains(&name)
    }

    /// Validate an exact-match filter and its sort fields
    fn check_filter(filter: &Filter) -> Result<(), EvplanError> {
        for (name, value) in filter.conditions().iter() {
            let def = known_field::<Self>(name)?;
            // `IS NULL` is a legal condition on any field
            if !value.is_null() {
                check_value::<Self>(def, value)?;
            }
        }
        for (name, _) in filter.order() {
            known_field::<Self>(name)?;
        }
        Ok(())
    }

    /// Validate the field set of a new record
    fn check_insert(fields: &Fields) -> Result<(), EvplanError> {
        for (name, value) in fields.iter() {
            let def = known_field::<Self>(name)?;
            if Self::GENERATED_KEY && Self::is_key(name) {
                return Err(immutable::<Self>(name));
            }
            check_value::<Self>(def, value)?;
        }
        Ok(())
    }

    /// Validate a partial update; key fields never change
    fn check_update(fields: &Fields) -> Result<(), EvplanError> {
        for (name, value) in fields.iter() {
            let def = known_field::<Self>(name)?;
            if Self::is_key(name) {
                return Err(immutable::<Self>(name));
            }
            check_value::<Self>(def, value)?;
        }
        Ok(())
    }
}

/// Kinds identified by a store-assigned integer `id`
pub trait Identified: Kind {
    fn id(&self) -> i64;
}

fn known_field<K: Kind>(name: &str) -> Result<&'static FieldDef, EvplanError> {
    K::field(name).ok_or_else(|| EvplanError::UnknownField {
        kind: K::NAME.to_string(),
        field: name.to_string(),
    })
}

fn check_value<K: Kind>(def: &FieldDef, value: &Value) -> Result<(), EvplanError> {
    if def.accepts(value) {
        return Ok(());
    }
    let expected = if def.nullable {
        format!("{} or null", def.ty.name())
    } else {
        def.ty.name().to_string()
    };
    Err(EvplanError::TypeMismatch {
        kind: K::NAME.to_string(),
        field: def.name.to_string(),
        expected,
        actual: value.type_name().to_string(),
    })
}

fn immutable<K: Kind>(name: &str) -> EvplanError {
    EvplanError::ImmutableField {
        kind: K::NAME.to_string(),
        field: name.to_string(),
    }
}
