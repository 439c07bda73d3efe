//! Serializer lookup and the default JSON serializer.
//!
//! [`SerializerRegistry::serializer_for`] resolves a serializer by model
//! name and falls back to the application serializer when a model has none
//! of its own. The stock application serializer is [`JsonSerializer`].

use std::collections::HashMap;
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::config::{BelongsToOptions, HasManyOptions, SerializeOptions};
use crate::errors::{SnapshotError, SnapshotResult};
use crate::identity::RecordId;
use crate::snapshot::{BelongsTo, Snapshot};
use crate::traits::model::RelationshipKind;
use crate::traits::serializer::Serializer;

pub struct SerializerRegistry {
    by_model: HashMap<String, Rc<dyn Serializer>>,
    application: Rc<dyn Serializer>,
}

impl Default for SerializerRegistry {
    fn default() -> Self {
        Self::new(JsonSerializer::default())
    }
}

impl SerializerRegistry {
    /// Registry whose fallback for every model is `application`.
    pub fn new(application: impl Serializer + 'static) -> Self {
        Self {
            by_model: HashMap::new(),
            application: Rc::new(application),
        }
    }

    pub fn register(&mut self, model_name: impl Into<String>, serializer: impl Serializer + 'static) {
        self.by_model.insert(model_name.into(), Rc::new(serializer));
    }

    pub fn serializer_for(&self, model_name: &str) -> Rc<dyn Serializer> {
        self.by_model
            .get(model_name)
            .map_or_else(|| Rc::clone(&self.application), Rc::clone)
    }
}

/// Writes a snapshot as a flat JSON object.
///
/// Attributes appear under their own names, belongsTo relationships as the
/// related id (or `null`), hasMany relationships as an array of ids.
/// Relationships whose data was never loaded are left out of the payload.
/// Related records without an id follow
/// [`HasMany::ids`](crate::snapshot::HasMany::ids): a hasMany skips them and
/// a belongsTo writes `null`.
///
/// Every key is written once. An attribute or relationship named like the
/// primary key fails with [`SnapshotError::PayloadKeyConflict`] instead of
/// overwriting the record id.
#[derive(Debug, Clone)]
pub struct JsonSerializer {
    primary_key: String,
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::with_primary_key("id")
    }
}

impl JsonSerializer {
    pub fn with_primary_key(primary_key: impl Into<String>) -> Self {
        Self {
            primary_key: primary_key.into(),
        }
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }
}

impl Serializer for JsonSerializer {
    fn serialize(&self, snapshot: &Snapshot, options: &SerializeOptions) -> SnapshotResult<Value> {
        let mut json = Map::new();

        if options.include_id
            && let Some(id) = snapshot.id()
        {
            json.insert(self.primary_key.clone(), Value::String(id.to_string()));
        }

        for (name, value) in snapshot.attributes() {
            insert_unique(&mut json, snapshot, name, value)?;
        }

        let mut relationships = Vec::new();
        snapshot.each_relationship(|name, meta| relationships.push((name, meta.kind())));

        for (name, kind) in relationships {
            let value = match kind {
                RelationshipKind::BelongsTo => match snapshot.belongs_to(name, BelongsToOptions::id())? {
                    BelongsTo::Unknown => continue,
                    related => related.id().map_or(Value::Null, id_value),
                },
                RelationshipKind::HasMany => match snapshot.has_many(name, HasManyOptions::ids())?.ids() {
                    Some(ids) => Value::Array(ids.into_iter().map(id_value).collect()),
                    None => continue,
                },
            };
            insert_unique(&mut json, snapshot, name.to_owned(), value)?;
        }

        Ok(Value::Object(json))
    }
}

fn id_value(id: &RecordId) -> Value {
    Value::String(id.to_string())
}

fn insert_unique(
    json: &mut Map<String, Value>,
    snapshot: &Snapshot,
    key: String,
    value: Value,
) -> SnapshotResult<()> {
    if json.contains_key(&key) {
        return Err(SnapshotError::PayloadKeyConflict {
            model_name: snapshot.model_name(),
            key,
        });
    }
    json.insert(key, value);
    Ok(())
}
