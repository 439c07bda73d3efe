//! The live-record collaborator seen by snapshots.
//!
//! A snapshot never touches a concrete record type. It reads through
//! [`LiveRecord`], which is everything the capture and resolution steps need:
//! identity, schema introspection, typed attribute reads, dirty tracking,
//! deletion state and relationship descriptors.

use std::rc::Rc;

use serde_json::Value;

use crate::identity::{ModelType, RecordId};
use crate::serializer::SerializerRegistry;
use crate::snapshot::ChangedAttributes;
use crate::traits::model::{AttributeDef, RelationshipMeta};

/// Shared handle to a live record of any model type.
pub type RecordRef = Rc<dyn LiveRecord>;

/// Contents of one relationship at the moment it is queried.
#[derive(Clone)]
pub struct RelationshipDescriptor {
    pub meta: &'static RelationshipMeta,
    /// Whether the relationship contents have ever been loaded.
    pub has_data: bool,
    /// Related records in relationship order. A belongsTo holds at most one.
    pub members: Vec<RecordRef>,
}

impl RelationshipDescriptor {
    /// The record a belongsTo currently points at.
    pub fn inverse_record(&self) -> Option<&RecordRef> {
        self.members.first()
    }
}

/// Mutable, in-memory record as seen by snapshots.
pub trait LiveRecord {
    fn model_type(&self) -> ModelType;

    fn id(&self) -> Option<RecordId>;

    /// Current value of attribute `name`, or `None` if it is not declared.
    fn read_attribute(&self, name: &str) -> Option<Value>;

    /// `(old, new)` for every attribute that differs from its committed value.
    fn changed_attributes(&self) -> ChangedAttributes;

    fn is_deleted(&self) -> bool;

    /// Descriptor for relationship `name`, or `None` if it is not declared.
    fn relationship(&self, name: &str) -> Option<RelationshipDescriptor>;

    /// Registry used to resolve the serializer for this record's model.
    fn serializers(&self) -> Rc<SerializerRegistry>;

    fn model_name(&self) -> &'static str {
        self.model_type().model_name()
    }

    fn each_attribute(&self, f: &mut dyn FnMut(&'static str, &'static AttributeDef)) {
        self.model_type().each_attribute(f)
    }

    fn each_relationship(&self, f: &mut dyn FnMut(&'static str, &'static RelationshipMeta)) {
        self.model_type().each_relationship(f)
    }
}
