//! Error types for snapshot and record-graph operations.
//!
//! Every fallible API in this crate returns [`SnapshotResult<T>`]. The two
//! variants callers meet most often, [`SnapshotError::UnknownAttribute`] and
//! [`SnapshotError::UnknownRelationship`], signal a schema mismatch in the
//! calling code rather than a transient failure, so there is nothing to retry.
//!
//! Relationship states such as "never loaded", "explicitly empty" or "points
//! at a deleted record" are ordinary values (see
//! [`BelongsTo`](crate::snapshot::BelongsTo) and
//! [`HasMany`](crate::snapshot::HasMany)), never errors.
//!
//! ```
//! use netabase_snapshot::errors::{SnapshotError, SnapshotResult};
//! use netabase_snapshot::RelationshipKind;
//!
//! fn lookup() -> SnapshotResult<()> {
//!     Err(SnapshotError::UnknownRelationship {
//!         model_name: "post",
//!         name: "editor".to_string(),
//!         expected: RelationshipKind::BelongsTo,
//!     })
//! }
//!
//! let err = lookup().unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Model 'post' has no belongsTo relationship named 'editor' defined"
//! );
//! ```

use thiserror::Error;

use crate::identity::RecordId;
use crate::traits::model::RelationshipKind;

/// Result type alias for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

#[derive(Error, Debug)]
pub enum SnapshotError {
    /// `attr` was called with a name that is not a declared attribute.
    #[error("Model '{model_name}' has no attribute named '{name}' defined")]
    UnknownAttribute {
        model_name: &'static str,
        name: String,
    },

    /// The name does not resolve to a relationship of the expected kind.
    #[error("Model '{model_name}' has no {expected} relationship named '{name}' defined")]
    UnknownRelationship {
        model_name: &'static str,
        name: String,
        expected: RelationshipKind,
    },

    /// A related record was attached whose model is not the declared target.
    #[error("Relationship '{relationship}' expects '{expected}' records, got '{found}'")]
    RelatedTypeMismatch {
        relationship: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// The record already carries an id.
    #[error("Record of model '{model_name}' already has id '{id}'")]
    IdAlreadyAssigned {
        model_name: &'static str,
        id: RecordId,
    },

    /// A serializer would write two values under the same payload key.
    #[error("Model '{model_name}' writes '{key}' twice; it collides with the primary key or another field")]
    PayloadKeyConflict {
        model_name: &'static str,
        key: String,
    },

    /// Wraps JSON errors raised by serializer implementations.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}
