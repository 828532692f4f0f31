use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// A record addressable by an opaque string id.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

/// Mapping-by-id collaborator behind every component.
///
/// Iteration follows insertion order. `update` and `insert_if_absent` run
/// under the store's write lock so read-modify-write sequences are atomic.
pub trait Repository<T: Record>: Send + Sync {
    fn get(&self, id: &str) -> Option<T>;
    fn put(&self, record: T);
    fn all(&self) -> Vec<T>;
    fn update(&self, id: &str, mutate: &mut dyn FnMut(&mut T)) -> Option<T>;
    /// Inserts `record` unless a stored record satisfies `clash`.
    fn insert_if_absent(&self, record: T, clash: &dyn Fn(&T) -> bool) -> bool;

    fn find(&self, pred: &dyn Fn(&T) -> bool) -> Vec<T> {
        self.all().into_iter().filter(|r| pred(r)).collect()
    }

    fn find_one(&self, pred: &dyn Fn(&T) -> bool) -> Option<T> {
        self.all().into_iter().find(|r| pred(r))
    }
}

struct Rows<T> {
    order: Vec<String>,
    by_id: HashMap<String, T>,
}

impl<T: Record> Rows<T> {
    fn insert(&mut self, record: T) {
        let id = record.id().to_string();
        if self.by_id.insert(id.clone(), record).is_none() {
            self.order.push(id);
        }
    }
}

pub struct InMemoryRepository<T> {
    rows: RwLock<Rows<T>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Rows {
                order: Vec::new(),
                by_id: HashMap::new(),
            }),
        }
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

// A panic while holding the lock leaves the map itself intact, so poisoning is ignored.
impl<T: Record> Repository<T> for InMemoryRepository<T> {
    fn get(&self, id: &str) -> Option<T> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        rows.by_id.get(id).cloned()
    }

    fn put(&self, record: T) {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        rows.insert(record);
    }

    fn all(&self) -> Vec<T> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        rows.order
            .iter()
            .filter_map(|id| rows.by_id.get(id).cloned())
            .collect()
    }

    fn update(&self, id: &str, mutate: &mut dyn FnMut(&mut T)) -> Option<T> {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        let record = rows.by_id.get_mut(id)?;
        mutate(record);
        Some(record.clone())
    }

    fn insert_if_absent(&self, record: T, clash: &dyn Fn(&T) -> bool) -> bool {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        if rows.by_id.values().any(|existing| clash(existing)) {
            return false;
        }
        rows.insert(record);
        true
    }
}
