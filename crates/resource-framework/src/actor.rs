//! # In-Memory Store Actor
//!
//! This module defines the `StoreActor`, the component that owns the stored rows of
//! one entity type. It implements the "Server" side of the Actor Model, processing
//! store requests sequentially and ensuring exclusive access to the rows.

use crate::client::StoreClient;
use crate::entity::{Resource, UniqueKey};
use crate::error::StoreError;
use crate::message::StoreRequest;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that owns every stored entity of type `T`.
///
/// # Architecture Note
/// This struct is the "Server" half of the store. It owns the rows, the unique-key
/// index and the receiver end of the channel.
///
/// **Concurrency Model**:
/// Requests are processed *sequentially* in a loop, so each `save` is atomic with
/// respect to every other request. That is what makes unique keys safe: two
/// concurrent creates with the same key are serialized here, the first one wins and
/// the second gets [`StoreError::UniqueViolation`]. No `Mutex` or pre-check needed.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `StoreActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Run**: Spawn the actor's run loop in a background task.
/// 3.  **Use**: Hand the client to a [`LifecycleService`](crate::service::LifecycleService).
///
/// # Implementation Details
///
/// * **Save (insert)**: the entity has no id. Unique keys are checked against the
///   index, the next sequence number becomes its id, and row and keys are inserted.
/// * **Save (update)**: the entity has an id. The row must exist; its unique keys may
///   only collide with the row's own keys. Old keys are released, new keys claimed.
/// * **DeleteById**: removes the row and its keys; reports whether anything was removed.
/// * **FindAll**: rows in identifier order. Ids come from an increasing sequence, so
///   this is also insertion order.
pub struct StoreActor<T: Resource> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    rows: BTreeMap<T::Id, T>,
    unique_index: HashMap<UniqueKey, T::Id>,
    next_id: u64,
}

impl<T: Resource> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let actor = Self {
            receiver,
            rows: BTreeMap::new(),
            unique_index: HashMap::new(),
            next_id: 1,
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the actor's event loop, processing requests until every client is dropped.
    pub async fn run(mut self) {
        let resource = T::resource_name();
        info!(resource, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::FindAll { respond_to } => {
                    debug!(resource, size = self.rows.len(), "FindAll");
                    let _ = respond_to.send(Ok(self.rows.values().cloned().collect()));
                }
                StoreRequest::FindById { id, respond_to } => {
                    let item = self.rows.get(&id).cloned();
                    debug!(resource, %id, found = item.is_some(), "FindById");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Save { entity, respond_to } => {
                    let result = self.save(entity);
                    match &result {
                        Ok(saved) => {
                            if let Some(id) = saved.id() {
                                debug!(resource, %id, size = self.rows.len(), "Saved");
                            }
                        }
                        Err(e) => warn!(resource, error = %e, "Save rejected"),
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::DeleteById { id, respond_to } => {
                    let removed = self.delete(&id);
                    debug!(resource, %id, removed, size = self.rows.len(), "DeleteById");
                    let _ = respond_to.send(Ok(removed));
                }
                StoreRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.rows.len()));
                }
            }
        }

        info!(resource, size = self.rows.len(), "Store shutdown");
    }

    fn save(&mut self, mut entity: T) -> Result<T, StoreError> {
        let keys = entity.unique_keys();
        let existing = entity.id().cloned();

        if let Some(id) = &existing {
            if !self.rows.contains_key(id) {
                return Err(StoreError::Missing(id.to_string()));
            }
        }

        // Check every key before touching anything so a rejected save writes nothing.
        for key in &keys {
            if let Some(owner) = self.unique_index.get(key) {
                if existing.as_ref() != Some(owner) {
                    return Err(StoreError::UniqueViolation {
                        field: key.field.to_string(),
                        value: key.value.clone(),
                    });
                }
            }
        }

        let id = match existing {
            Some(id) => {
                if let Some(previous) = self.rows.get(&id) {
                    for key in previous.unique_keys() {
                        self.unique_index.remove(&key);
                    }
                }
                id
            }
            None => {
                let id = T::Id::from(self.next_id);
                self.next_id += 1;
                entity.assign_id(id.clone());
                id
            }
        };

        for key in keys {
            self.unique_index.insert(key, id.clone());
        }
        self.rows.insert(id, entity.clone());
        Ok(entity)
    }

    fn delete(&mut self, id: &T::Id) -> bool {
        match self.rows.remove(id) {
            Some(removed) => {
                for key in removed.unique_keys() {
                    self.unique_index.remove(&key);
                }
                true
            }
            None => false,
        }
    }
}
