//! Model definitions and their static schema.
//!
//! A **Model** is a plain Rust struct whose fields are the record's
//! attributes. Deriving [`Model`](crate::Model) produces, at definition time:
//!
//! - a `'static` [`ModelSchema`] listing attributes and relationships in
//!   declaration order
//! - a typed accessor table, so reading attribute `title` compiles down to a
//!   match arm that serializes `self.title`; nothing is looked up by string
//!   on the struct at read time
//!
//! Relationships are declared on the struct, not as fields, because their
//! contents belong to the live record graph (see
//! [`Record`](crate::record::Record)) rather than to the attribute data.
//!
//! # Example
//!
//! ```
//! use netabase_snapshot::prelude::*;
//!
//! #[derive(Model, Clone, Debug)]
//! #[model(name = "post", belongs_to(author = "user"), has_many(comments = "comment"))]
//! pub struct Post {
//!     pub title: String,
//!     pub body: Option<String>,
//! }
//!
//! let schema = Post::schema();
//! assert_eq!(schema.model_name(), "post");
//! assert!(schema.attribute("title").is_some());
//! assert_eq!(
//!     schema.relationship("author").map(|r| r.kind()),
//!     Some(RelationshipKind::BelongsTo)
//! );
//! ```

use serde_json::Value;
use strum::{Display, EnumIs, IntoStaticStr};

/// A struct whose fields form the attributes of a record type.
///
/// Normally implemented through `#[derive(Model)]`.
pub trait Model: Clone + 'static {
    /// Static schema for this model type.
    fn schema() -> &'static ModelSchema;

    /// Reads attribute `name` as a JSON value, or `None` when `name` is not a
    /// declared attribute.
    fn read_attribute(&self, name: &str) -> Option<Value>;
}

/// Kind of a declared relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIs, IntoStaticStr)]
pub enum RelationshipKind {
    #[strum(serialize = "belongsTo")]
    BelongsTo,
    #[strum(serialize = "hasMany")]
    HasMany,
}

/// A declared attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDef {
    name: &'static str,
    type_name: &'static str,
}

impl AttributeDef {
    pub const fn new(name: &'static str, type_name: &'static str) -> Self {
        Self { name, type_name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rust type of the backing field, as written in the struct.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// Metadata for a declared relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipMeta {
    name: &'static str,
    kind: RelationshipKind,
    target: &'static str,
}

impl RelationshipMeta {
    pub const fn belongs_to(name: &'static str, target: &'static str) -> Self {
        Self {
            name,
            kind: RelationshipKind::BelongsTo,
            target,
        }
    }

    pub const fn has_many(name: &'static str, target: &'static str) -> Self {
        Self {
            name,
            kind: RelationshipKind::HasMany,
            target,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    /// Model name of the related records.
    pub fn target(&self) -> &'static str {
        self.target
    }
}

/// Static description of a model type.
#[derive(Debug, PartialEq, Eq)]
pub struct ModelSchema {
    model_name: &'static str,
    attributes: &'static [AttributeDef],
    relationships: &'static [RelationshipMeta],
}

impl ModelSchema {
    pub const fn new(
        model_name: &'static str,
        attributes: &'static [AttributeDef],
        relationships: &'static [RelationshipMeta],
    ) -> Self {
        Self {
            model_name,
            attributes,
            relationships,
        }
    }

    pub fn model_name(&self) -> &'static str {
        self.model_name
    }

    pub fn attributes(&self) -> &'static [AttributeDef] {
        self.attributes
    }

    pub fn relationships(&self) -> &'static [RelationshipMeta] {
        self.relationships
    }

    pub fn attribute(&self, name: &str) -> Option<&'static AttributeDef> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn relationship(&self, name: &str) -> Option<&'static RelationshipMeta> {
        self.relationships.iter().find(|r| r.name == name)
    }

    /// Calls `f` for every attribute, in declaration order.
    pub fn each_attribute(&self, mut f: impl FnMut(&'static str, &'static AttributeDef)) {
        for attribute in self.attributes {
            f(attribute.name, attribute);
        }
    }

    /// Calls `f` for every relationship, in declaration order.
    pub fn each_relationship(&self, mut f: impl FnMut(&'static str, &'static RelationshipMeta)) {
        for relationship in self.relationships {
            f(relationship.name, relationship);
        }
    }
}
