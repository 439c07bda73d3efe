//! # Netabase Snapshot
//!
//! The data layer core of an ORM: model definitions, live records with
//! belongsTo/hasMany relationships, and point-in-time snapshots of those
//! records for adapters and serializers.
//!
//! ## Features
//!
//! - **Typed models**: `#[derive(Model)]` turns a struct into a static schema
//!   with compiled attribute accessors
//! - **Dirty tracking**: live records report `(old, new)` for changed attributes
//! - **Frozen attributes**: a snapshot's attributes never change after it is built
//! - **Lazy relationships**: resolved on first access, once per mode, then cached
//! - **Three-state relationships**: unknown, known-empty and populated are all
//!   distinguishable
//! - **Cycle-safe graphs**: records hold weak links; child snapshots are built
//!   one level at a time
//!
//! ## Quick Start
//!
//! ```rust
//! use netabase_snapshot::prelude::*;
//!
//! #[derive(Model, Clone, Debug)]
//! #[model(name = "comment")]
//! pub struct Comment {
//!     pub body: String,
//! }
//!
//! #[derive(Model, Clone, Debug)]
//! #[model(name = "post", has_many(comments = "comment"))]
//! pub struct Post {
//!     pub title: String,
//! }
//!
//! # fn main() -> SnapshotResult<()> {
//! let store = Store::new();
//! let post = store.push(1u64, Post { title: "Hello".into() });
//! let first = store.push(2u64, Comment { body: "First".into() });
//! let spam = store.push(3u64, Comment { body: "Spam".into() });
//!
//! let members = [first.clone() as RecordRef, spam.clone() as RecordRef];
//! post.set_has_many("comments", &members)?;
//! spam.delete_record();
//!
//! let snapshot = post.create_snapshot(SnapshotOptions::default());
//! let ids = snapshot.has_many("comments", HasManyOptions::ids())?;
//! assert_eq!(ids.ids(), Some(vec![&RecordId::from("2")]));
//! # Ok(())
//! # }
//! ```

extern crate self as netabase_snapshot;

pub mod config;
pub mod errors;
pub mod identity;
pub mod prelude;
pub mod record;
pub mod serializer;
pub mod snapshot;
pub mod store;
pub mod traits;

pub use errors::{SnapshotError, SnapshotResult};
pub use identity::{ModelType, RecordId, RecordIdentity};
pub use netabase_snapshot_macros::Model;
pub use record::Record;
pub use snapshot::{BelongsTo, HasMany, RelatedRecord, ResolveMode, Snapshot};
pub use store::Store;
pub use traits::model::{AttributeDef, Model, ModelSchema, RelationshipKind, RelationshipMeta};

/// Support code for `#[derive(Model)]`. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use serde_json::Value;

    /// Converts a field to an attribute value; unrepresentable values read as null.
    pub fn to_attribute_value<T: serde::Serialize + ?Sized>(
        model_name: &'static str,
        attribute: &'static str,
        value: &T,
    ) -> Value {
        serde_json::to_value(value).unwrap_or_else(|err| {
            log::warn!(
                "{}: attribute '{}' is not representable as JSON ({}), reading as null",
                model_name,
                attribute,
                err
            );
            Value::Null
        })
    }
}
