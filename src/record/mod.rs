//! In-memory live records.
//!
//! A [`Record<M>`] is the mutable side of the data layer: it holds the
//! current model value, the last committed value (for dirty tracking), a
//! deletion flag, an id slot and the contents of every declared
//! relationship. Snapshots read it through [`LiveRecord`]; nothing in a
//! snapshot ever writes back.
//!
//! # Relationship ownership
//!
//! Relationship members are stored as weak references. Records never keep
//! each other alive, so a post that belongs to a user who has many posts does
//! not leak. The owner of the graph is whoever holds the strong handles,
//! normally the [`Store`](crate::store::Store) identity map. A member whose
//! record has been dropped reads as absent.

use std::cell::{Cell, Ref, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use log::trace;
use serde_json::Value;

use crate::config::SnapshotOptions;
use crate::errors::{SnapshotError, SnapshotResult};
use crate::identity::{ModelType, RecordId};
use crate::serializer::SerializerRegistry;
use crate::snapshot::{ChangedAttributes, Snapshot};
use crate::traits::model::{Model, RelationshipKind, RelationshipMeta};
use crate::traits::record::{LiveRecord, RecordRef, RelationshipDescriptor};

#[derive(Default)]
struct RelationshipState {
    has_data: bool,
    members: Vec<Weak<dyn LiveRecord>>,
}

/// Live record of model `M`.
pub struct Record<M: Model> {
    id: RefCell<Option<RecordId>>,
    current: RefCell<M>,
    canonical: RefCell<M>,
    deleted: Cell<bool>,
    relationships: RefCell<HashMap<&'static str, RelationshipState>>,
    serializers: Rc<SerializerRegistry>,
}

impl<M: Model> Record<M> {
    /// Creates a saved record; `data` is both its current and committed state.
    pub fn new(id: impl Into<RecordId>, data: M) -> Rc<Self> {
        Self::build(Some(id.into()), data, Rc::new(SerializerRegistry::default()))
    }

    /// Creates a record that has no id yet.
    pub fn new_unsaved(data: M) -> Rc<Self> {
        Self::build(None, data, Rc::new(SerializerRegistry::default()))
    }

    pub(crate) fn build(
        id: Option<RecordId>,
        data: M,
        serializers: Rc<SerializerRegistry>,
    ) -> Rc<Self> {
        let mut relationships = HashMap::new();
        M::schema().each_relationship(|name, _| {
            relationships.insert(name, RelationshipState::default());
        });

        Rc::new(Self {
            id: RefCell::new(id),
            canonical: RefCell::new(data.clone()),
            current: RefCell::new(data),
            deleted: Cell::new(false),
            relationships: RefCell::new(relationships),
            serializers,
        })
    }

    /// Assigns the id of a record created with [`Record::new_unsaved`].
    pub fn assign_id(&self, id: impl Into<RecordId>) -> SnapshotResult<()> {
        let mut slot = self.id.borrow_mut();
        if let Some(existing) = slot.as_ref() {
            return Err(SnapshotError::IdAlreadyAssigned {
                model_name: M::schema().model_name(),
                id: existing.clone(),
            });
        }
        *slot = Some(id.into());
        Ok(())
    }

    /// Borrows the current model value.
    pub fn get(&self) -> Ref<'_, M> {
        self.current.borrow()
    }

    /// Mutates the current model value.
    pub fn update<R>(&self, f: impl FnOnce(&mut M) -> R) -> R {
        f(&mut self.current.borrow_mut())
    }

    /// Makes the current value the committed one; clears changed attributes.
    pub fn commit(&self) {
        let current = self.current.borrow().clone();
        *self.canonical.borrow_mut() = current;
    }

    /// Discards uncommitted attribute changes.
    pub fn rollback(&self) {
        let canonical = self.canonical.borrow().clone();
        *self.current.borrow_mut() = canonical;
    }

    pub fn delete_record(&self) {
        self.deleted.set(true);
    }

    pub fn set_belongs_to(&self, name: &str, related: Option<&RecordRef>) -> SnapshotResult<()> {
        let meta = self.relationship_meta(name, RelationshipKind::BelongsTo)?;
        let members = match related {
            Some(record) => vec![self.downgrade_checked(meta, record)?],
            None => Vec::new(),
        };
        self.replace_members(meta, members);
        Ok(())
    }

    pub fn set_has_many(&self, name: &str, related: &[RecordRef]) -> SnapshotResult<()> {
        let meta = self.relationship_meta(name, RelationshipKind::HasMany)?;
        let members = related
            .iter()
            .map(|record| self.downgrade_checked(meta, record))
            .collect::<SnapshotResult<Vec<_>>>()?;
        self.replace_members(meta, members);
        Ok(())
    }

    /// Appends `related` to hasMany `name` unless it is already a member.
    pub fn push_has_many(&self, name: &str, related: &RecordRef) -> SnapshotResult<()> {
        let meta = self.relationship_meta(name, RelationshipKind::HasMany)?;
        let member = self.downgrade_checked(meta, related)?;
        let mut relationships = self.relationships.borrow_mut();
        let state = relationships.entry(meta.name()).or_default();
        state.has_data = true;
        if !state.members.iter().any(|m| Weak::ptr_eq(m, &member)) {
            state.members.push(member);
        }
        Ok(())
    }

    pub fn remove_has_many(&self, name: &str, related: &RecordRef) -> SnapshotResult<()> {
        let meta = self.relationship_meta(name, RelationshipKind::HasMany)?;
        let target = Rc::downgrade(related);
        let mut relationships = self.relationships.borrow_mut();
        let state = relationships.entry(meta.name()).or_default();
        state.has_data = true;
        state.members.retain(|m| !Weak::ptr_eq(m, &target));
        Ok(())
    }

    pub fn create_snapshot(self: &Rc<Self>, options: SnapshotOptions) -> Snapshot {
        let record: RecordRef = self.clone();
        Snapshot::new(record, options)
    }

    fn relationship_meta(
        &self,
        name: &str,
        expected: RelationshipKind,
    ) -> SnapshotResult<&'static RelationshipMeta> {
        M::schema()
            .relationship(name)
            .filter(|meta| meta.kind() == expected)
            .ok_or_else(|| SnapshotError::UnknownRelationship {
                model_name: M::schema().model_name(),
                name: name.to_owned(),
                expected,
            })
    }

    fn downgrade_checked(
        &self,
        meta: &'static RelationshipMeta,
        related: &RecordRef,
    ) -> SnapshotResult<Weak<dyn LiveRecord>> {
        let found = related.model_name();
        if found != meta.target() {
            return Err(SnapshotError::RelatedTypeMismatch {
                relationship: meta.name(),
                expected: meta.target(),
                found,
            });
        }
        Ok(Rc::downgrade(related))
    }

    fn replace_members(&self, meta: &'static RelationshipMeta, members: Vec<Weak<dyn LiveRecord>>) {
        trace!(
            "Record {}: {} '{}' set to {} member(s)",
            M::schema().model_name(),
            meta.kind(),
            meta.name(),
            members.len()
        );
        let mut relationships = self.relationships.borrow_mut();
        let state = relationships.entry(meta.name()).or_default();
        state.has_data = true;
        state.members = members;
    }
}

impl<M: Model> LiveRecord for Record<M> {
    fn model_type(&self) -> ModelType {
        ModelType::of::<M>()
    }

    fn id(&self) -> Option<RecordId> {
        self.id.borrow().clone()
    }

    fn read_attribute(&self, name: &str) -> Option<Value> {
        self.current.borrow().read_attribute(name)
    }

    fn changed_attributes(&self) -> ChangedAttributes {
        let current = self.current.borrow();
        let canonical = self.canonical.borrow();
        let mut changed = ChangedAttributes::new();
        M::schema().each_attribute(|name, _| {
            let old = canonical.read_attribute(name).unwrap_or(Value::Null);
            let new = current.read_attribute(name).unwrap_or(Value::Null);
            if old != new {
                changed.insert(name.to_owned(), (old, new));
            }
        });
        changed
    }

    fn is_deleted(&self) -> bool {
        self.deleted.get()
    }

    fn relationship(&self, name: &str) -> Option<RelationshipDescriptor> {
        let meta = M::schema().relationship(name)?;
        let relationships = self.relationships.borrow();
        let state = relationships.get(meta.name())?;
        Some(RelationshipDescriptor {
            meta,
            has_data: state.has_data,
            members: state.members.iter().filter_map(Weak::upgrade).collect(),
        })
    }

    fn serializers(&self) -> Rc<SerializerRegistry> {
        Rc::clone(&self.serializers)
    }
}

impl<M: Model + fmt::Debug> fmt::Debug for Record<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("model", &M::schema().model_name())
            .field("id", &self.id.borrow())
            .field("current", &self.current.borrow())
            .field("deleted", &self.deleted.get())
            .finish_non_exhaustive()
    }
}
