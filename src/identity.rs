//! Record identity: id, model type and model name.

use std::fmt;

use derive_more::{Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

use crate::traits::model::ModelSchema;

/// Primary identifier of a record.
///
/// Ids are always strings; numeric ids coerce to their decimal form so that
/// `RecordId::from(7u64) == RecordId::from("7")`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Deref, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

macro_rules! impl_numeric_id {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RecordId {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

impl_numeric_id!(u32, u64, i32, i64, usize);

impl PartialEq<str> for RecordId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RecordId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Handle to the static schema of a model type.
///
/// This is the one canonical type reference; the model name is read from it.
#[derive(Clone, Copy, Deref)]
pub struct ModelType(&'static ModelSchema);

impl ModelType {
    pub fn of<M: crate::Model>() -> Self {
        Self(M::schema())
    }

    pub fn schema(&self) -> &'static ModelSchema {
        self.0
    }
}

impl From<&'static ModelSchema> for ModelType {
    fn from(schema: &'static ModelSchema) -> Self {
        Self(schema)
    }
}

impl PartialEq for ModelType {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0) || self.0.model_name() == other.0.model_name()
    }
}

impl Eq for ModelType {}

impl fmt::Debug for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelType").field(&self.0.model_name()).finish()
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.model_name())
    }
}

/// Identity of the record a snapshot was taken from.
///
/// Copied out of the live record once, when the snapshot is built, and never
/// refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordIdentity {
    id: Option<RecordId>,
    model_type: ModelType,
}

impl RecordIdentity {
    pub fn new(id: Option<RecordId>, model_type: ModelType) -> Self {
        Self { id, model_type }
    }

    /// `None` for a record that has not been assigned an id yet.
    pub fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    pub fn model_name(&self) -> &'static str {
        self.model_type.model_name()
    }
}

impl fmt::Display for RecordIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}:{}", self.model_name(), id),
            None => write!(f, "{}:(new)", self.model_name()),
        }
    }
}
