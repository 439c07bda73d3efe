use serde_json::Value;

use crate::config::SerializeOptions;
use crate::errors::SnapshotResult;
use crate::snapshot::Snapshot;

/// Turns a snapshot into a plain payload.
///
/// Serializers only ever see a [`Snapshot`], never the live record, so what
/// they write is the frozen view taken before the triggering operation.
pub trait Serializer {
    fn serialize(&self, snapshot: &Snapshot, options: &SerializeOptions) -> SnapshotResult<Value>;
}
