//! Persisted cart and wishlist stores.
//!
//! Both stores share one piece of machinery, [`PersistedStore`], which owns
//! an in-memory collection, runs the hydration protocol, and writes every
//! change back through an ordered write queue.
//!
//! # Hydration
//!
//! ```text
//! Uninitialized --initialize()--> Loading --load resolves--> Ready
//! ```
//!
//! Until the store is `Ready`, mutations apply to the in-memory collection
//! and are journaled, but nothing is written: the persisted copy has not
//! been read yet and an early write would clobber it. When the load
//! resolves, the journal is replayed on top of the loaded collection, the
//! result becomes the store's collection, and the phase flips to `Ready`
//! under the same lock. If anything was replayed the merged collection is
//! written once.
//!
//! A store is a cheap handle (`Arc` inside). Clones share state.

mod cart;
mod wishlist;
mod writer;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::watch;
use tracing::{debug, info, instrument};

use tote_core::Collection;

use crate::storage::PersistenceAdapter;

pub use cart::CartStore;
pub use wishlist::WishlistStore;

use writer::WriteQueue;

/// Lifecycle of a store's hydration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed; storage not touched yet.
    Uninitialized,
    /// Load issued and not yet resolved.
    Loading,
    /// Loaded (or defaulted); every mutation writes through.
    Ready,
}

struct StoreState<C: Collection> {
    phase: Phase,
    items: C,
    journal: Vec<C::Op>,
}

struct StoreInner<C: Collection> {
    key: &'static str,
    adapter: PersistenceAdapter,
    state: RwLock<StoreState<C>>,
    writer: WriteQueue<C>,
    ready: watch::Sender<bool>,
}

/// Shared hydration and write-through machinery for one collection.
pub(crate) struct PersistedStore<C: Collection> {
    inner: Arc<StoreInner<C>>,
}

impl<C: Collection> Clone for PersistedStore<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Collection> PersistedStore<C> {
    /// Create an uninitialized store persisted under `key`.
    ///
    /// Must be called from within a Tokio runtime: the write queue worker is
    /// spawned here.
    pub(crate) fn new(adapter: PersistenceAdapter, key: &'static str) -> Self {
        let writer = WriteQueue::spawn(adapter.clone(), key);
        let (ready, _) = watch::channel(false);
        Self {
            inner: Arc::new(StoreInner {
                key,
                adapter,
                state: RwLock::new(StoreState {
                    phase: Phase::Uninitialized,
                    items: C::default(),
                    journal: Vec::new(),
                }),
                writer,
                ready,
            }),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, StoreState<C>> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, StoreState<C>> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Current hydration phase.
    pub(crate) fn phase(&self) -> Phase {
        self.read_state().phase
    }

    /// Whether hydration has completed.
    pub(crate) fn is_ready(&self) -> bool {
        self.phase() == Phase::Ready
    }

    /// Run `f` against the current collection.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.read_state().items)
    }

    /// Clone of the current collection.
    pub(crate) fn snapshot(&self) -> C {
        self.read(C::clone)
    }

    /// Apply `op` and, once ready, queue a write of the full collection.
    pub(crate) fn apply(&self, op: C::Op) {
        self.apply_with(|_| (Some(op), ()));
    }

    /// Decide on an operation by looking at the current collection, then
    /// apply it, all under one lock.
    ///
    /// `decide` returns the operation to apply (if any) and a value handed
    /// back to the caller.
    pub(crate) fn apply_with<R>(&self, decide: impl FnOnce(&C) -> (Option<C::Op>, R)) -> R {
        let mut state = self.write_state();
        let (op, result) = decide(&state.items);
        let Some(op) = op else {
            return result;
        };

        match state.phase {
            Phase::Ready => {
                state.items.apply(op);
                // Enqueue under the lock so queue order matches mutation order.
                self.inner.writer.enqueue(state.items.clone());
            }
            Phase::Uninitialized | Phase::Loading => {
                debug!(key = self.inner.key, ?op, "Mutation before hydration, journaling");
                state.items.apply(op.clone());
                state.journal.push(op);
            }
        }
        result
    }

    /// Move from `Uninitialized` to `Loading`. Returns `false` if hydration
    /// has already been started.
    fn begin_hydration(&self) -> bool {
        let mut state = self.write_state();
        if state.phase != Phase::Uninitialized {
            return false;
        }
        state.phase = Phase::Loading;
        true
    }

    /// Start hydration on a background task. Later calls are no-ops.
    pub(crate) fn initialize(&self) {
        if !self.begin_hydration() {
            debug!(key = self.inner.key, "Hydration already started");
            return;
        }
        let store = self.clone();
        tokio::spawn(async move { store.load_and_install().await });
    }

    /// Hydrate inline and wait for it. Later calls wait for readiness only.
    pub(crate) async fn hydrate(&self) {
        if self.begin_hydration() {
            self.load_and_install().await;
        } else {
            self.wait_ready().await;
        }
    }

    #[instrument(skip(self), fields(key = self.inner.key))]
    async fn load_and_install(&self) {
        let loaded: Option<C> = self.inner.adapter.load(self.inner.key).await;
        let found = loaded.is_some();

        let (entries, replayed) = {
            let mut state = self.write_state();
            let journal = std::mem::take(&mut state.journal);
            let replayed = journal.len();

            let mut items = loaded.unwrap_or_default();
            for op in journal {
                items.apply(op);
            }
            state.items = items;
            state.phase = Phase::Ready;

            if replayed > 0 {
                self.inner.writer.enqueue(state.items.clone());
            }
            (state.items.len(), replayed)
        };

        self.inner.ready.send_replace(true);
        info!(found, entries, replayed, "Store hydrated");
    }

    /// Wait until hydration has completed.
    pub(crate) async fn wait_ready(&self) {
        let mut ready = self.inner.ready.subscribe();
        // The sender lives as long as `self`, so this only returns once ready.
        let _ = ready.wait_for(|ready| *ready).await;
    }

    /// Wait until every write queued so far has been performed.
    pub(crate) async fn flush(&self) {
        self.inner.writer.flush().await;
    }
}
