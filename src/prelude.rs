//! Convenience re-exports for building models, records and snapshots.
//!
//! ```rust
//! use netabase_snapshot::prelude::*;
//! ```

pub use crate::config::{BelongsToOptions, HasManyOptions, SerializeOptions, SnapshotOptions};
pub use crate::errors::{SnapshotError, SnapshotResult};
pub use crate::identity::{ModelType, RecordId, RecordIdentity};
pub use crate::record::Record;
pub use crate::serializer::{JsonSerializer, SerializerRegistry};
pub use crate::snapshot::{
    AttributeMap, BelongsTo, ChangedAttributes, HasMany, RelatedRecord, ResolveMode, Snapshot,
    SnapshotRef,
};
pub use crate::store::Store;
pub use crate::traits::model::{AttributeDef, Model, ModelSchema, RelationshipKind, RelationshipMeta};
pub use crate::traits::record::{LiveRecord, RecordRef, RelationshipDescriptor};
pub use crate::traits::serializer::Serializer;
pub use netabase_snapshot_macros::Model;
