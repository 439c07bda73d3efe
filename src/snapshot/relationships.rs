use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::trace;
use strum::{Display, EnumIs};

use crate::config::SnapshotOptions;
use crate::errors::{SnapshotError, SnapshotResult};
use crate::identity::{ModelType, RecordId};
use crate::snapshot::{Snapshot, SnapshotRef};
use crate::traits::model::{RelationshipKind, RelationshipMeta};
use crate::traits::record::RecordRef;

/// How related records are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIs)]
pub enum ResolveMode {
    /// Nested child snapshots
    #[strum(serialize = "full")]
    Full,
    /// Raw record ids
    #[strum(serialize = "identifier")]
    Identifier,
}

impl ResolveMode {
    pub fn from_identifier_flag(as_identifier: bool) -> Self {
        if as_identifier {
            Self::Identifier
        } else {
            Self::Full
        }
    }
}

/// One related record, in the shape the resolve mode asked for.
#[derive(Clone, EnumIs)]
pub enum RelatedRecord {
    Snapshot(SnapshotRef),
    /// `None` when the related record has not been assigned an id yet.
    Id(Option<RecordId>),
}

impl RelatedRecord {
    pub fn snapshot(&self) -> Option<&SnapshotRef> {
        match self {
            Self::Snapshot(snapshot) => Some(snapshot),
            Self::Id(_) => None,
        }
    }

    /// Id of the related record, whichever shape it was resolved in.
    pub fn id(&self) -> Option<&RecordId> {
        match self {
            Self::Snapshot(snapshot) => snapshot.id(),
            Self::Id(id) => id.as_ref(),
        }
    }
}

impl PartialEq for RelatedRecord {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Snapshot(a), Self::Snapshot(b)) => Rc::ptr_eq(a, b),
            (Self::Id(a), Self::Id(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for RelatedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snapshot(snapshot) => f.debug_tuple("Snapshot").field(snapshot.identity()).finish(),
            Self::Id(id) => f.debug_tuple("Id").field(id).finish(),
        }
    }
}

/// Resolved value of a belongsTo relationship.
#[derive(Debug, Clone, PartialEq, EnumIs)]
pub enum BelongsTo {
    /// Relationship data was never loaded.
    Unknown,
    /// Loaded and empty, or pointing at a deleted record.
    Null,
    Record(RelatedRecord),
}

impl BelongsTo {
    pub fn record(&self) -> Option<&RelatedRecord> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Option<&SnapshotRef> {
        self.record().and_then(RelatedRecord::snapshot)
    }

    pub fn id(&self) -> Option<&RecordId> {
        self.record().and_then(RelatedRecord::id)
    }
}

/// Resolved value of a hasMany relationship.
#[derive(Debug, Clone, PartialEq, EnumIs)]
pub enum HasMany {
    /// Relationship data was never loaded.
    Unknown,
    /// Loaded; surviving members in relationship order. May be empty.
    Records(Vec<RelatedRecord>),
}

impl HasMany {
    pub fn records(&self) -> Option<&[RelatedRecord]> {
        match self {
            Self::Records(records) => Some(records),
            Self::Unknown => None,
        }
    }

    pub fn snapshots(&self) -> Option<Vec<&SnapshotRef>> {
        self.records()
            .map(|records| records.iter().filter_map(RelatedRecord::snapshot).collect())
    }

    /// Member ids; members without an id are skipped.
    pub fn ids(&self) -> Option<Vec<&RecordId>> {
        self.records()
            .map(|records| records.iter().filter_map(RelatedRecord::id).collect())
    }

    pub fn member_count(&self) -> Option<usize> {
        self.records().map(<[RelatedRecord]>::len)
    }
}

#[derive(Debug, Clone)]
enum Slot<T> {
    Unresolved,
    Resolved(T),
}

type SlotKey = (&'static str, ResolveMode);

/// Lazily resolves relationships and remembers each `(name, mode)` result.
///
/// Every declared relationship gets one slot per mode up front. A slot moves
/// from `Unresolved` to `Resolved` exactly once and is never recomputed, even
/// if the live record changes afterward.
pub struct RelationshipResolver {
    model_type: ModelType,
    belongs_to: RefCell<HashMap<SlotKey, Slot<BelongsTo>>>,
    has_many: RefCell<HashMap<SlotKey, Slot<HasMany>>>,
}

impl RelationshipResolver {
    pub fn new(model_type: ModelType) -> Self {
        let mut belongs_to = HashMap::new();
        let mut has_many = HashMap::new();
        model_type.each_relationship(|name, meta| {
            for mode in [ResolveMode::Full, ResolveMode::Identifier] {
                match meta.kind() {
                    RelationshipKind::BelongsTo => {
                        belongs_to.insert((name, mode), Slot::Unresolved);
                    }
                    RelationshipKind::HasMany => {
                        has_many.insert((name, mode), Slot::Unresolved);
                    }
                }
            }
        });

        Self {
            model_type,
            belongs_to: RefCell::new(belongs_to),
            has_many: RefCell::new(has_many),
        }
    }

    pub fn resolve_belongs_to(
        &self,
        record: &RecordRef,
        name: &str,
        mode: ResolveMode,
    ) -> SnapshotResult<BelongsTo> {
        let meta = self.lookup(name, RelationshipKind::BelongsTo)?;
        let key = (meta.name(), mode);

        if let Some(Slot::Resolved(value)) = self.belongs_to.borrow().get(&key) {
            trace!("{}: belongsTo '{}' ({}) served from cache", self.model_type, name, mode);
            return Ok(value.clone());
        }

        let descriptor = record
            .relationship(meta.name())
            .ok_or_else(|| self.unknown(name, RelationshipKind::BelongsTo))?;

        let value = if !descriptor.has_data {
            BelongsTo::Unknown
        } else {
            match descriptor.inverse_record() {
                Some(related) if !related.is_deleted() => BelongsTo::Record(resolve_member(related, mode)),
                _ => BelongsTo::Null,
            }
        };

        trace!("{}: resolved belongsTo '{}' ({}) -> {:?}", self.model_type, name, mode, value);
        self.belongs_to.borrow_mut().insert(key, Slot::Resolved(value.clone()));
        Ok(value)
    }

    pub fn resolve_has_many(
        &self,
        record: &RecordRef,
        name: &str,
        mode: ResolveMode,
    ) -> SnapshotResult<HasMany> {
        let meta = self.lookup(name, RelationshipKind::HasMany)?;
        let key = (meta.name(), mode);

        if let Some(Slot::Resolved(value)) = self.has_many.borrow().get(&key) {
            trace!("{}: hasMany '{}' ({}) served from cache", self.model_type, name, mode);
            return Ok(value.clone());
        }

        let descriptor = record
            .relationship(meta.name())
            .ok_or_else(|| self.unknown(name, RelationshipKind::HasMany))?;

        let value = if descriptor.has_data {
            HasMany::Records(
                descriptor
                    .members
                    .iter()
                    .filter(|member| !member.is_deleted())
                    .map(|member| resolve_member(member, mode))
                    .collect(),
            )
        } else {
            HasMany::Unknown
        };

        trace!(
            "{}: resolved hasMany '{}' ({}) -> {} member(s)",
            self.model_type,
            name,
            mode,
            value.member_count().map_or_else(|| "unknown".to_string(), |n| n.to_string())
        );
        self.has_many.borrow_mut().insert(key, Slot::Resolved(value.clone()));
        Ok(value)
    }

    pub fn is_resolved(&self, name: &str, mode: ResolveMode) -> bool {
        let Some(meta) = self.model_type.relationship(name) else {
            return false;
        };
        let key = (meta.name(), mode);
        match meta.kind() {
            RelationshipKind::BelongsTo => {
                matches!(self.belongs_to.borrow().get(&key), Some(Slot::Resolved(_)))
            }
            RelationshipKind::HasMany => {
                matches!(self.has_many.borrow().get(&key), Some(Slot::Resolved(_)))
            }
        }
    }

    fn lookup(&self, name: &str, expected: RelationshipKind) -> SnapshotResult<&'static RelationshipMeta> {
        self.model_type
            .relationship(name)
            .filter(|meta| meta.kind() == expected)
            .ok_or_else(|| self.unknown(name, expected))
    }

    fn unknown(&self, name: &str, expected: RelationshipKind) -> SnapshotError {
        SnapshotError::UnknownRelationship {
            model_name: self.model_type.model_name(),
            name: name.to_owned(),
            expected,
        }
    }
}

/// Children are built one level deep; their own relationships stay lazy.
fn resolve_member(record: &RecordRef, mode: ResolveMode) -> RelatedRecord {
    match mode {
        ResolveMode::Identifier => RelatedRecord::Id(record.id()),
        ResolveMode::Full => RelatedRecord::Snapshot(Rc::new(Snapshot::new(
            Rc::clone(record),
            SnapshotOptions::default(),
        ))),
    }
}
