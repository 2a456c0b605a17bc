//! # Payload Object Pool
//!
//! Bounded free-list of reusable payload containers. Each [`Pooled`] guard
//! owns its object; dropping the guard recycles the object into the pool.
//! Moving the guard hands ownership (and the release duty) to the callee,
//! so an object is released exactly once and cannot be read afterwards.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use qc_18_wire_codec::WireObject;

/// Objects that can be reset before reuse.
pub trait Recycle: Default + Send {
    /// Clear any state left from the previous use.
    fn recycle(&mut self);
}

struct PoolInner<T> {
    free: Mutex<Vec<T>>,
    capacity: usize,
    acquired: AtomicU64,
    released: AtomicU64,
}

/// Shared, thread-safe pool. Cloning yields another handle to the same pool.
pub struct ObjectPool<T: Recycle> {
    inner: Arc<PoolInner<T>>,
}

impl<T: Recycle> Clone for ObjectPool<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Recycle> ObjectPool<T> {
    /// `capacity` bounds the number of idle objects retained.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                free: Mutex::new(Vec::with_capacity(capacity)),
                capacity,
                acquired: AtomicU64::new(0),
                released: AtomicU64::new(0),
            }),
        }
    }

    /// Take an idle object, or allocate a fresh one.
    pub fn acquire(&self) -> Pooled<T> {
        let item = self.inner.free.lock().pop().unwrap_or_default();
        self.inner.acquired.fetch_add(1, Ordering::Relaxed);
        Pooled {
            item,
            pool: Arc::clone(&self.inner),
        }
    }

    pub fn idle(&self) -> usize {
        self.inner.free.lock().len()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    pub fn acquired(&self) -> u64 {
        self.inner.acquired.load(Ordering::Relaxed)
    }

    pub fn released(&self) -> u64 {
        self.inner.released.load(Ordering::Relaxed)
    }

    /// Guards currently alive.
    pub fn outstanding(&self) -> u64 {
        self.acquired().saturating_sub(self.released())
    }
}

/// RAII guard over a pooled object.
pub struct Pooled<T: Recycle> {
    item: T,
    pool: Arc<PoolInner<T>>,
}

impl<T: Recycle> Deref for Pooled<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}

impl<T: Recycle> DerefMut for Pooled<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.item
    }
}

impl<T: Recycle> Drop for Pooled<T> {
    fn drop(&mut self) {
        let mut item = std::mem::take(&mut self.item);
        item.recycle();

        let mut free = self.pool.free.lock();
        if free.len() < self.pool.capacity {
            free.push(item);
        }
        drop(free);

        self.pool.released.fetch_add(1, Ordering::Relaxed);
    }
}

/// Container for one decoded gossip payload.
#[derive(Debug, Default)]
pub struct GossipSlot {
    pub payload: Option<WireObject>,
}

impl GossipSlot {
    pub fn set(&mut self, payload: WireObject) {
        self.payload = Some(payload);
    }

    pub fn payload(&self) -> Option<&WireObject> {
        self.payload.as_ref()
    }
}

impl Recycle for GossipSlot {
    fn recycle(&mut self) {
        self.payload = None;
    }
}

/// Pool of gossip payload containers shared by pipeline workers.
pub type GossipPool = ObjectPool<GossipSlot>;
