//! Materialized result rows.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SqliteResult;
use crate::value::Value;

/// One result row: column names paired with their values, in result-set order.
///
/// The shape is whatever the statement produced; nothing is declared up front.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    pub(crate) fn from_parts(columns: Vec<String>, values: Vec<Value>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Value of the named column, if the row has it.
    ///
    /// When a query yields duplicate column names the first one wins.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.values.get(idx))
    }

    pub fn get_index(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Duplicate column names keep their first value, as with [`Row::get`].
    pub fn into_map(self) -> HashMap<String, Value> {
        let mut map = HashMap::with_capacity(self.columns.len());
        for (column, value) in self.columns.into_iter().zip(self.values) {
            map.entry(column).or_insert(value);
        }
        map
    }

    /// Map the row onto a caller-supplied record type by column name.
    ///
    /// Duplicate column names keep their first value, as with [`Row::get`].
    pub fn deserialize<T: DeserializeOwned>(&self) -> SqliteResult<T> {
        let mut object = serde_json::Map::with_capacity(self.columns.len());
        for (column, value) in self.iter() {
            object
                .entry(column.to_string())
                .or_insert_with(|| value.to_json());
        }
        Ok(serde_json::from_value(serde_json::Value::Object(object))?)
    }
}
