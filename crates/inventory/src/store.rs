use std::sync::{Arc, PoisonError, RwLock};

use crate::medicine::Medicine;

/// Ordered, process-lifetime collection of medicine records.
///
/// Reads hand out snapshots: callers own the returned vectors and cannot
/// mutate the store through them.
pub trait InventoryStore: Send + Sync {
    /// Add a record at the end of the sequence.
    fn append(&self, medicine: Medicine);

    /// All records in insertion order.
    fn all(&self) -> Vec<Medicine>;

    /// Records with `price <= max_price`, in insertion order.
    fn filter_by_max_price(&self, max_price: f64) -> Vec<Medicine>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    fn append(&self, medicine: Medicine) {
        (**self).append(medicine)
    }

    fn all(&self) -> Vec<Medicine> {
        (**self).all()
    }

    fn filter_by_max_price(&self, max_price: f64) -> Vec<Medicine> {
        (**self).filter_by_max_price(max_price)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// In-memory store guarded by a single `RwLock`.
///
/// Appends take the write lock and reads take the read lock, so each call is
/// atomic with respect to every other call. A poisoned lock is recovered:
/// `Vec::push` never leaves the sequence half-written.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    inner: RwLock<Vec<Medicine>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }
}

impl InventoryStore for InMemoryInventoryStore {
    fn append(&self, medicine: Medicine) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(medicine);
    }

    fn all(&self) -> Vec<Medicine> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn filter_by_max_price(&self, max_price: f64) -> Vec<Medicine> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|m| m.is_priced_at_most(max_price))
            .cloned()
            .collect()
    }

    fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
