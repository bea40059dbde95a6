//! In-memory store for the order summary collection.
//!
//! The store is the only mutator of the collection: the pull path
//! replaces it wholesale, the push path merges patches in place. Each
//! operation takes the write lock for its full duration, so concurrent
//! high-level operations (a pull racing a push) serialize at the store
//! boundary and the most recently completed write wins.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use log::warn;

use super::model::{SummaryLine, SummaryPatch};

/// Ordered collection of summary lines plus the load state observed by
/// rendering layers.
///
/// # Invariants
///
/// - `product_id` is unique within the collection after every operation.
/// - Line position is preserved across in-place merges and replaced
///   wholesale by [`replace_all`](Self::replace_all).
#[derive(Debug, Default)]
pub struct SummaryStore {
    lines: RwLock<Vec<SummaryLine>>,
    is_loading: Arc<AtomicBool>,
    last_update: RwLock<Option<DateTime<Utc>>>,
}

/// RAII guard for the loading flag.
///
/// Raised at the start of a pull and cleared on drop, so the flag cannot
/// stay stuck on an error path.
pub struct LoadingGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl SummaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the current collection.
    pub fn lines(&self) -> Vec<SummaryLine> {
        self.lines.read().expect("summary lines lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.lines.read().expect("summary lines lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Atomically replaces the entire collection.
    ///
    /// Always succeeds; an empty input yields an empty collection.
    /// Duplicate `product_id`s in the input are collapsed to the last
    /// occurrence so the uniqueness invariant holds (the backend groups
    /// by product and should never send duplicates).
    ///
    /// Returns the size of the new collection.
    pub fn replace_all(&self, lines: Vec<SummaryLine>) -> usize {
        let mut deduped: Vec<SummaryLine> = Vec::with_capacity(lines.len());
        for line in lines {
            if let Some(existing) = deduped.iter_mut().find(|l| l.product_id == line.product_id) {
                warn!(
                    "Duplicate product_id {} in summary data; keeping the later row",
                    line.product_id
                );
                *existing = line;
            } else {
                deduped.push(line);
            }
        }

        let mut guard = self.lines.write().expect("summary lines lock poisoned");
        *guard = deduped;
        guard.len()
    }

    /// Merges patches into existing lines in place, in listed order.
    ///
    /// A patch whose `product_id` matches no existing line is silently
    /// ignored: full updates are the only creation path. Later patches
    /// for the same `product_id` override earlier ones within one call.
    ///
    /// Returns post-merge clones of the lines that were actually updated,
    /// one entry per distinct line, so observers can re-render (and name)
    /// exactly the affected rows without tracking object identity.
    pub fn apply_patch(&self, patches: &[SummaryPatch]) -> Vec<SummaryLine> {
        let mut guard = self.lines.write().expect("summary lines lock poisoned");

        let mut updated_indices: Vec<usize> = Vec::new();
        for patch in patches {
            let Some(index) = guard.iter().position(|l| l.product_id == patch.product_id) else {
                continue;
            };
            guard[index].merge(patch);
            if !updated_indices.contains(&index) {
                updated_indices.push(index);
            }
        }

        updated_indices.into_iter().map(|i| guard[i].clone()).collect()
    }

    /// Raises the loading flag; it clears when the returned guard drops.
    pub fn begin_loading(&self) -> LoadingGuard {
        self.is_loading.store(true, Ordering::SeqCst);
        LoadingGuard {
            flag: Arc::clone(&self.is_loading),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.load(Ordering::SeqCst)
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        *self.last_update.read().expect("last_update lock poisoned")
    }

    /// Records now as the time of the last successful update.
    pub fn touch_last_update(&self) {
        *self.last_update.write().expect("last_update lock poisoned") = Some(Utc::now());
    }
}
