use std::collections::BTreeMap;

use serde_json::Value;

use crate::errors::{SnapshotError, SnapshotResult};
use crate::traits::record::LiveRecord;

/// Attribute name to captured value.
pub type AttributeMap = BTreeMap<String, Value>;

/// Attribute name to `(old, new)`.
pub type ChangedAttributes = BTreeMap<String, (Value, Value)>;

/// Attribute values frozen at snapshot construction.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeCapture {
    model_name: &'static str,
    values: AttributeMap,
    changed: ChangedAttributes,
}

impl AttributeCapture {
    /// Single pass over the record's declared attributes.
    pub fn capture(record: &dyn LiveRecord) -> Self {
        let mut values = AttributeMap::new();
        record.each_attribute(&mut |name, _| {
            let value = record.read_attribute(name).unwrap_or(Value::Null);
            values.insert(name.to_owned(), value);
        });

        Self {
            model_name: record.model_name(),
            values,
            changed: record.changed_attributes(),
        }
    }

    pub fn attr(&self, name: &str) -> SnapshotResult<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| SnapshotError::UnknownAttribute {
                model_name: self.model_name,
                name: name.to_owned(),
            })
    }

    pub fn attributes(&self) -> AttributeMap {
        self.values.clone()
    }

    pub fn changed_attributes(&self) -> ChangedAttributes {
        self.changed.clone()
    }

    pub(crate) fn values(&self) -> &AttributeMap {
        &self.values
    }
}
