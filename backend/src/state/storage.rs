//! Entity storage module
//! Defines the storage trait and the in-memory implementation used by services

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A stored record with a numeric identity
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human-readable entity kind, used in log and error messages
    const KIND: &'static str;

    /// The entity's id
    fn id(&self) -> u64;
}

/// Per-type id sequence
///
/// Hands out 1, 2, 3, ... and never repeats a value, even when called
/// concurrently.
#[derive(Debug)]
pub struct IdSequence {
    next: AtomicU64,
}

impl IdSequence {
    /// Create a sequence starting at 1
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Take the next id
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Storage for one entity type
///
/// Implementations own the canonical copy of every entity. Callers read
/// copies and write mutations back with `save`.
pub trait Storage<T: Entity>: Send + Sync {
    /// Allocate the next id for a new entity
    fn next_id(&self) -> u64;

    /// Insert the entity, or overwrite the one with the same id
    fn save(&mut self, entity: T);

    /// All stored entities; callers must not rely on the order
    fn get_all(&self) -> Vec<T>;

    /// Look up an entity by id
    fn find_by_id(&self, id: u64) -> Option<T>;
}

/// In-memory storage backed by an ordered map
pub struct InMemoryStorage<T> {
    entities: BTreeMap<u64, T>,
    ids: IdSequence,
}

impl<T> InMemoryStorage<T> {
    /// Create an empty storage with a fresh id sequence
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            ids: IdSequence::new(),
        }
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the storage holds no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<T> Default for InMemoryStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for InMemoryStorage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryStorage")
            .field("len", &self.entities.len())
            .field("ids", &self.ids)
            .finish()
    }
}

impl<T: Entity> Storage<T> for InMemoryStorage<T> {
    fn next_id(&self) -> u64 {
        self.ids.next_id()
    }

    fn save(&mut self, entity: T) {
        self.entities.insert(entity.id(), entity);
    }

    fn get_all(&self) -> Vec<T> {
        self.entities.values().cloned().collect()
    }

    fn find_by_id(&self, id: u64) -> Option<T> {
        self.entities.get(&id).cloned()
    }
}
