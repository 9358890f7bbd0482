//! Structured equality selectors
//!
//! A selector is a list of (field, value) equality constraints. Values are
//! carried as data all the way to the backend: the JSON form is produced by
//! `serde_json` and the SQLite backend binds them as parameters, so an id
//! such as `D1", "objectType": {"$gt": null` stays a literal string.

use serde_json::{Map, Value};
use trafficledger_core::ObjectType;

/// Document fields a selector may constrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorField {
    ObjectType,
    DriverId,
}

impl SelectorField {
    /// Field name inside the stored document
    pub fn json_name(&self) -> &'static str {
        match self {
            SelectorField::ObjectType => "objectType",
            SelectorField::DriverId => "driverID",
        }
    }

    /// SQLite JSON path for the field
    pub fn json_path(&self) -> &'static str {
        match self {
            SelectorField::ObjectType => "$.objectType",
            SelectorField::DriverId => "$.driverID",
        }
    }
}

/// Exact-match document filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    constraints: Vec<(SelectorField, String)>,
}

impl Selector {
    /// All documents of one kind
    pub fn object_type(object_type: ObjectType) -> Self {
        Self {
            constraints: vec![(SelectorField::ObjectType, object_type.as_str().to_string())],
        }
    }

    /// Add an equality constraint. A repeated field replaces the earlier value.
    pub fn and(mut self, field: SelectorField, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.constraints.iter_mut().find(|(f, _)| *f == field) {
            Some(existing) => existing.1 = value,
            None => self.constraints.push((field, value)),
        }
        self
    }

    /// Narrow to documents owned by `driver_id`
    pub fn owned_by(self, driver_id: impl Into<String>) -> Self {
        self.and(SelectorField::DriverId, driver_id)
    }

    pub fn constraints(&self) -> &[(SelectorField, String)] {
        &self.constraints
    }

    /// True when every constraint equals the document's string field
    pub fn matches(&self, document: &Value) -> bool {
        self.constraints.iter().all(|(field, expected)| {
            document
                .get(field.json_name())
                .and_then(Value::as_str)
                .is_some_and(|actual| actual == expected)
        })
    }

    /// Mango-style query document: `{"selector": {"objectType": "..."}}`
    pub fn to_query_json(&self) -> Value {
        let mut fields = Map::new();
        for (field, value) in &self.constraints {
            fields.insert(field.json_name().to_string(), Value::String(value.clone()));
        }
        let mut query = Map::new();
        query.insert("selector".to_string(), Value::Object(fields));
        Value::Object(query)
    }

    pub fn to_query_string(&self) -> String {
        self.to_query_json().to_string()
    }
}
