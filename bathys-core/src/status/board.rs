//! Published status snapshot
//!
//! The orchestrator renders a complete page and swaps it in; readers copy
//! the current page out under a short lock. A reader never sees a partially
//! written page.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::String;

/// Maximum rendered page size in bytes
pub const SNAPSHOT_CAPACITY: usize = 12 * 1024;

/// One rendered status page
pub type Snapshot = String<SNAPSHOT_CAPACITY>;

struct Published {
    generation: u32,
    snapshot: Snapshot,
}

/// Holder of the latest rendered snapshot
pub struct StatusBoard<M: RawMutex> {
    inner: Mutex<M, RefCell<Published>>,
}

impl<M: RawMutex> Default for StatusBoard<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> StatusBoard<M> {
    /// Empty board, generation 0
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Published {
                generation: 0,
                snapshot: String::new(),
            })),
        }
    }

    /// Replace the current snapshot, returning the new generation
    pub fn replace(&self, snapshot: Snapshot) -> u32 {
        self.inner.lock(|cell| {
            let mut published = cell.borrow_mut();
            published.snapshot = snapshot;
            published.generation = published.generation.wrapping_add(1);
            published.generation
        })
    }

    /// Number of snapshots published so far
    pub fn generation(&self) -> u32 {
        self.inner.lock(|cell| cell.borrow().generation)
    }

    /// Copy the current snapshot into `out`, returning its generation
    pub fn copy_into(&self, out: &mut Snapshot) -> u32 {
        self.inner.lock(|cell| {
            let published = cell.borrow();
            out.clear();
            // Same capacity on both sides, cannot fail
            let _ = out.push_str(&published.snapshot);
            published.generation
        })
    }

    /// Run `f` on the current snapshot while holding the lock
    pub fn read<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        self.inner.lock(|cell| f(cell.borrow().snapshot.as_str()))
    }
}
