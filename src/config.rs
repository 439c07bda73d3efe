//! Options for building snapshots, resolving relationships and serializing.
//!
//! Every option struct is built with `typed-builder` and also implements
//! `Default`, so the common case needs no configuration at all.
//!
//! # Examples
//!
//! ```
//! use netabase_snapshot::config::{HasManyOptions, SerializeOptions, SnapshotOptions};
//! use serde_json::json;
//!
//! let options = SnapshotOptions::builder()
//!     .adapter_options(json!({ "dryRun": true }))
//!     .include(vec!["comments".to_string()])
//!     .build();
//! assert_eq!(options.include, vec!["comments"]);
//!
//! assert!(HasManyOptions::builder().ids(true).build().ids);
//! assert!(!SerializeOptions::default().include_id);
//! ```

use serde_json::Value;
use typed_builder::TypedBuilder;

use crate::snapshot::ResolveMode;

/// Options attached to a snapshot when it is created.
#[derive(Debug, Clone, Default, TypedBuilder)]
#[builder(doc)]
pub struct SnapshotOptions {
    /// Opaque options handed through to the adapter
    #[builder(default, setter(strip_option))]
    pub adapter_options: Option<Value>,

    /// Relationship paths the caller asked to side-load
    #[builder(default)]
    pub include: Vec<String>,
}

/// Options for [`Snapshot::belongs_to`](crate::Snapshot::belongs_to).
#[derive(Debug, Clone, Copy, Default, TypedBuilder)]
#[builder(doc)]
pub struct BelongsToOptions {
    /// Return the related record's id instead of a nested snapshot
    #[builder(default = false)]
    pub id: bool,
}

impl BelongsToOptions {
    pub fn id() -> Self {
        Self { id: true }
    }

    pub fn mode(&self) -> ResolveMode {
        ResolveMode::from_identifier_flag(self.id)
    }
}

/// Options for [`Snapshot::has_many`](crate::Snapshot::has_many).
#[derive(Debug, Clone, Copy, Default, TypedBuilder)]
#[builder(doc)]
pub struct HasManyOptions {
    /// Return member ids instead of nested snapshots
    #[builder(default = false)]
    pub ids: bool,
}

impl HasManyOptions {
    pub fn ids() -> Self {
        Self { ids: true }
    }

    pub fn mode(&self) -> ResolveMode {
        ResolveMode::from_identifier_flag(self.ids)
    }
}

/// Options forwarded to a [`Serializer`](crate::traits::serializer::Serializer).
#[derive(Debug, Clone, Default, TypedBuilder)]
#[builder(doc)]
pub struct SerializeOptions {
    /// Write the record id into the payload
    #[builder(default = false)]
    pub include_id: bool,
}

impl SerializeOptions {
    pub fn with_id() -> Self {
        Self { include_id: true }
    }
}
