use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

use crate::value::FieldValue;

static NULL: FieldValue = FieldValue::Null;

/// In-progress state of one form-bound record.
///
/// Only the owning controller mutates a draft; validators receive it
/// read-only to look at companion fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    values: BTreeMap<&'static str, FieldValue>,
    errors: BTreeMap<&'static str, String>,
    touched: BTreeSet<&'static str>,
    extras: Map<String, Value>,
}

impl Draft {
    /// Current value of `key`, `Null` if unset.
    pub fn value(&self, key: &str) -> &FieldValue {
        self.values.get(key).unwrap_or(&NULL)
    }

    pub fn values(&self) -> &BTreeMap<&'static str, FieldValue> {
        &self.values
    }

    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<&'static str, String> {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_touched(&self, key: &str) -> bool {
        self.touched.contains(key)
    }

    pub fn touched(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.touched.iter().copied()
    }

    /// Entity keys carried through unchanged because no field describes them.
    pub fn extras(&self) -> &Map<String, Value> {
        &self.extras
    }

    pub(crate) fn set_value(&mut self, key: &'static str, value: FieldValue) {
        self.values.insert(key, value);
    }

    /// Store or clear the error for `key`. At most one error per field.
    pub(crate) fn set_error(&mut self, key: &'static str, error: Option<String>) {
        match error {
            Some(message) => {
                self.errors.insert(key, message);
            }
            None => {
                self.errors.remove(key);
            }
        }
    }

    pub(crate) fn touch(&mut self, key: &'static str) {
        self.touched.insert(key);
    }

    pub(crate) fn set_extra(&mut self, key: String, value: Value) {
        self.extras.insert(key, value);
    }
}
