use crate::{
    error::{AppError, Result},
    models::EntityId,
};
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

/// A record that like toggles are serialized on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Post(EntityId),
    Comment(EntityId),
}

/// One async lock per record.
///
/// A toggle holds the record's lock from the fresh read through the PATCH, so
/// two toggles on the same record from this process run one after the other
/// and the second one sees the first one's result. A record's lock is dropped
/// from the map once nobody holds or waits for it.
#[derive(Clone, Default)]
pub struct MutationQueue {
    locks: Arc<DashMap<EntityRef, Arc<Mutex<()>>>>,
}

/// Held for the duration of one mutation.
#[derive(Debug)]
pub struct EntityLock {
    guard: Option<OwnedMutexGuard<()>>,
    entity: EntityRef,
    locks: Arc<DashMap<EntityRef, Arc<Mutex<()>>>>,
}

impl Drop for EntityLock {
    fn drop(&mut self) {
        self.guard.take();
        // Waiters clone the Arc under the same shard lock, so a count of one
        // means only the map still knows about it.
        self.locks
            .remove_if(&self.entity, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl MutationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, entity: EntityRef) -> EntityLock {
        let lock = self.locks.entry(entity.clone()).or_default().clone();
        if lock.try_lock().is_err() {
            debug!("Waiting for in-flight mutation on {:?}", entity);
        }
        let guard = lock.lock_owned().await;

        EntityLock {
            guard: Some(guard),
            entity,
            locks: self.locks.clone(),
        }
    }

    /// Records with a mutation running or queued.
    pub fn active(&self) -> usize {
        self.locks.len()
    }
}

/// A form whose submissions must not overlap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormKey {
    NewPost,
    Comment {
        post_id: EntityId,
        parent: Option<EntityId>,
    },
}

/// Tracks which forms have a create request in flight.
#[derive(Clone, Default)]
pub struct SubmissionGuard {
    in_flight: Arc<DashMap<FormKey, ()>>,
}

/// Held while a create request is running. Dropping it re-enables the form.
#[derive(Debug)]
pub struct InFlight {
    key: FormKey,
    in_flight: Arc<DashMap<FormKey, ()>>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.in_flight.remove(&self.key);
    }
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `key`, or fails if a submission for it is still running.
    pub fn begin(&self, key: FormKey) -> Result<InFlight> {
        match self.in_flight.entry(key.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("A submission is already in progress")),
            Entry::Vacant(slot) => {
                slot.insert(());
                Ok(InFlight {
                    key,
                    in_flight: self.in_flight.clone(),
                })
            }
        }
    }

    pub fn is_in_flight(&self, key: &FormKey) -> bool {
        self.in_flight.contains_key(key)
    }
}
