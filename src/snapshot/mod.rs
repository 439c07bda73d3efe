//! Point-in-time views of live records.
//!
//! A [`Snapshot`] freezes a record's attributes and changed attributes the
//! moment it is built, then resolves relationships lazily: the first query
//! for a relationship in a given mode reads the live record, and every later
//! query returns that first answer. Adapters and serializers can therefore
//! hold a snapshot across a save or reload while the live record keeps
//! changing.
//!
//! # Relationship states
//!
//! | Live state                              | belongsTo          | hasMany                  |
//! |-----------------------------------------|--------------------|--------------------------|
//! | never loaded                            | `BelongsTo::Unknown` | `HasMany::Unknown`     |
//! | loaded, empty                           | `BelongsTo::Null`  | `HasMany::Records(vec![])` |
//! | loaded, related record deleted          | `BelongsTo::Null`  | member skipped           |
//! | loaded, related record present          | `BelongsTo::Record(..)` | member included     |
//!
//! # Example
//!
//! ```
//! use netabase_snapshot::prelude::*;
//!
//! #[derive(Model, Clone, Debug)]
//! #[model(name = "user")]
//! pub struct User {
//!     pub name: String,
//! }
//!
//! #[derive(Model, Clone, Debug)]
//! #[model(name = "post", belongs_to(author = "user"))]
//! pub struct Post {
//!     pub title: String,
//! }
//!
//! # fn main() -> SnapshotResult<()> {
//! let author = Record::new(7u64, User { name: "Ada".into() });
//! let post = Record::new(1u64, Post { title: "Hello".into() });
//! let author_ref: RecordRef = author.clone();
//! post.set_belongs_to("author", Some(&author_ref))?;
//!
//! let snapshot = post.create_snapshot(SnapshotOptions::default());
//! post.update(|p| p.title = "Changed".into());
//!
//! assert_eq!(snapshot.attr("title")?, "Hello");
//! assert_eq!(snapshot.belongs_to("author", BelongsToOptions::id())?.id().map(|id| id.as_str()), Some("7"));
//! # Ok(())
//! # }
//! ```

mod attributes;
mod relationships;

pub use attributes::{AttributeCapture, AttributeMap, ChangedAttributes};
pub use relationships::{BelongsTo, HasMany, RelatedRecord, RelationshipResolver, ResolveMode};

use std::fmt;
use std::rc::Rc;

use log::debug;
use serde_json::Value;

use crate::config::{BelongsToOptions, HasManyOptions, SerializeOptions, SnapshotOptions};
use crate::errors::SnapshotResult;
use crate::identity::{ModelType, RecordId, RecordIdentity};
use crate::traits::model::{AttributeDef, RelationshipMeta};
use crate::traits::record::RecordRef;

/// Immutable, point-in-time view of a live record.
pub struct Snapshot {
    identity: RecordIdentity,
    record: RecordRef,
    attributes: AttributeCapture,
    relationships: RelationshipResolver,
    adapter_options: Option<Value>,
    include: Vec<String>,
}

impl Snapshot {
    /// Captures identity and attributes now; relationships wait until queried.
    pub fn new(record: RecordRef, options: SnapshotOptions) -> Self {
        let model_type = record.model_type();
        let identity = RecordIdentity::new(record.id(), model_type);
        let attributes = AttributeCapture::capture(record.as_ref());
        debug!("Snapshot: captured {} ({} attribute(s))", identity, attributes.values().len());

        Self {
            identity,
            relationships: RelationshipResolver::new(model_type),
            attributes,
            record,
            adapter_options: options.adapter_options,
            include: options.include,
        }
    }

    pub fn id(&self) -> Option<&RecordId> {
        self.identity.id()
    }

    pub fn model_type(&self) -> ModelType {
        self.identity.model_type()
    }

    pub fn model_name(&self) -> &'static str {
        self.identity.model_name()
    }

    pub fn identity(&self) -> &RecordIdentity {
        &self.identity
    }

    /// The live record this snapshot was taken from.
    pub fn record(&self) -> &RecordRef {
        &self.record
    }

    pub fn adapter_options(&self) -> Option<&Value> {
        self.adapter_options.as_ref()
    }

    pub fn include(&self) -> &[String] {
        &self.include
    }

    /// Value of attribute `name` as it was when the snapshot was built.
    pub fn attr(&self, name: &str) -> SnapshotResult<&Value> {
        self.attributes.attr(name)
    }

    /// A copy of every captured attribute.
    pub fn attributes(&self) -> AttributeMap {
        self.attributes.attributes()
    }

    /// A copy of the `(old, new)` pairs captured with the snapshot.
    pub fn changed_attributes(&self) -> ChangedAttributes {
        self.attributes.changed_attributes()
    }

    /// Resolves belongsTo `name`; `options.id` asks for the related id only.
    pub fn belongs_to(&self, name: &str, options: BelongsToOptions) -> SnapshotResult<BelongsTo> {
        self.relationships
            .resolve_belongs_to(&self.record, name, options.mode())
    }

    /// Resolves hasMany `name`; `options.ids` asks for member ids only.
    pub fn has_many(&self, name: &str, options: HasManyOptions) -> SnapshotResult<HasMany> {
        self.relationships
            .resolve_has_many(&self.record, name, options.mode())
    }

    /// Whether `name` has already been resolved in `mode`.
    pub fn is_relationship_resolved(&self, name: &str, mode: ResolveMode) -> bool {
        self.relationships.is_resolved(name, mode)
    }

    pub fn each_attribute(&self, mut f: impl FnMut(&'static str, &'static AttributeDef)) {
        self.record.each_attribute(&mut f)
    }

    pub fn each_relationship(&self, mut f: impl FnMut(&'static str, &'static RelationshipMeta)) {
        self.record.each_relationship(&mut f)
    }

    /// Serializes this snapshot with the serializer registered for its model.
    pub fn serialize(&self, options: &SerializeOptions) -> SnapshotResult<Value> {
        let serializers = self.record.serializers();
        serializers
            .serializer_for(self.model_name())
            .serialize(self, options)
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("identity", &self.identity)
            .field("attributes", self.attributes.values())
            .finish_non_exhaustive()
    }
}

/// Shared snapshot handle, as produced for related records.
pub type SnapshotRef = Rc<Snapshot>;
