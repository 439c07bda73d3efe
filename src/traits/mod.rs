//! Traits at the seams of the crate: model definitions, the live-record
//! collaborator consumed by snapshots, and serializers.

pub mod model;
pub mod record;
pub mod serializer;
