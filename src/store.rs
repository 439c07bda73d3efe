//! Identity map that owns the live record graph.
//!
//! Records link to each other through weak references, so the graph stays
//! alive only as long as something holds strong handles. The [`Store`] is
//! that something: it keeps exactly one record per `(model name, id)` and
//! hands every record it creates the store's serializer registry.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::identity::RecordId;
use crate::record::Record;
use crate::serializer::SerializerRegistry;
use crate::traits::model::Model;
use crate::traits::record::RecordRef;
use crate::traits::serializer::Serializer;

pub struct Store {
    records: RefCell<HashMap<&'static str, HashMap<RecordId, RecordRef>>>,
    serializers: Rc<SerializerRegistry>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_serializers(SerializerRegistry::default())
    }

    pub fn with_serializers(serializers: SerializerRegistry) -> Self {
        Self {
            records: RefCell::new(HashMap::new()),
            serializers: Rc::new(serializers),
        }
    }

    /// Adds a record to the identity map, replacing any record of the same
    /// model with the same id.
    pub fn push<M: Model>(&self, id: impl Into<RecordId>, data: M) -> Rc<Record<M>> {
        let id = id.into();
        let record = Record::build(Some(id.clone()), data, Rc::clone(&self.serializers));
        let model_name = M::schema().model_name();
        let handle: RecordRef = record.clone();
        if self
            .records
            .borrow_mut()
            .entry(model_name)
            .or_default()
            .insert(id.clone(), handle)
            .is_some()
        {
            debug!("Store: replaced {}:{}", model_name, id);
        } else {
            debug!("Store: pushed {}:{}", model_name, id);
        }
        record
    }

    pub fn peek(&self, model_name: &str, id: impl Into<RecordId>) -> Option<RecordRef> {
        let id = id.into();
        self.records
            .borrow()
            .get(model_name)
            .and_then(|records| records.get(&id))
            .map(Rc::clone)
    }

    /// Drops the store's handle to a record. Relationships that pointed at it
    /// read as absent once no other strong handle remains.
    pub fn unload(&self, model_name: &str, id: impl Into<RecordId>) -> Option<RecordRef> {
        let id = id.into();
        let removed = self
            .records
            .borrow_mut()
            .get_mut(model_name)
            .and_then(|records| records.remove(&id));
        if removed.is_some() {
            debug!("Store: unloaded {}:{}", model_name, id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.records.borrow().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn serializer_for(&self, model_name: &str) -> Rc<dyn Serializer> {
        self.serializers.serializer_for(model_name)
    }
}
