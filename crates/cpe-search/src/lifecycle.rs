//! Reference-counted lifecycle for the shared in-memory index.
//!
//! The corpus is large and expensive to build, so all callers in a process
//! share one instance: the first `open` builds it, matching `close` calls
//! tear it down when the last user leaves. Every operation runs under one
//! lock scoped to the whole call, trading search throughput for lifecycle
//! correctness; rebuilds are rare and heavyweight next to individual queries.

use std::sync::{Arc, Mutex, MutexGuard};

use tantivy::query::Query;
use tantivy::{DocAddress, Index};
use tracing::{debug, info, warn};

use cpe_types::PairSource;

use crate::builder::{build_corpus, BuildConfig};
use crate::document::IndexEntry;
use crate::searcher::{CpeSearcher, SearchHit};
use crate::SearchError;

/// Sentinel returned by `num_docs` when no generation is open.
pub const NOT_READY: i64 = -1;

/// One build-to-teardown lifetime of the index.
///
/// Field order is teardown order: the read view and query parser drop before
/// the corpus storage and tokenizer instances owned by the `Index`.
struct Generation {
    searcher: CpeSearcher,
    /// Keeps the corpus storage alive for as long as the searcher reads it.
    _index: Index,
}

#[derive(Default)]
struct IndexState {
    /// Outstanding opens not yet matched by a close.
    users: usize,
    /// Live generation; present iff `users > 0`.
    generation: Option<Generation>,
}

/// Reference-counted, shared in-memory CPE index.
///
/// Clones share the same underlying state; hand one to each component that
/// needs lookups instead of going through a global. Callers must pair every
/// successful `open` with exactly one `close`, including on their own error
/// paths, or the corpus stays resident until process exit.
///
/// A second `open` while the index is already open reuses the existing
/// corpus even if a different source is passed; the count must cycle through
/// zero to force a rebuild from fresh data.
#[derive(Clone, Default)]
pub struct CpeMemoryIndex {
    inner: Arc<Mutex<IndexState>>,
    config: BuildConfig,
}

impl CpeMemoryIndex {
    /// Create a closed index with the default build configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a closed index with an explicit build configuration.
    pub fn with_config(config: BuildConfig) -> Self {
        Self {
            inner: Arc::default(),
            config,
        }
    }

    /// Open the index, building the corpus from `source` on first use.
    ///
    /// A failed build leaves the index exactly as it was before the call.
    pub fn open(&self, source: &dyn PairSource) -> Result<(), SearchError> {
        let mut state = self.lock()?;

        if state.users == 0 {
            let index = build_corpus(source, &self.config)?;
            let searcher = CpeSearcher::new(&index)?;
            state.generation = Some(Generation {
                searcher,
                _index: index,
            });
            info!("Opened CPE index");
        }

        // Incremented only after a successful build, so a failed first open
        // leaves the counter at its pre-call value.
        state.users += 1;
        debug!(users = state.users, "CPE index user added");
        Ok(())
    }

    /// Release one use of the index, tearing it down on the last close.
    ///
    /// Closing an already-closed index is a no-op; teardown failures are
    /// logged, never propagated.
    pub fn close(&self) {
        match self.inner.lock() {
            Ok(mut state) => {
                if state.users == 0 {
                    return;
                }
                state.users -= 1;
                debug!(users = state.users, "CPE index user removed");
                if state.users == 0 {
                    state.generation = None;
                    info!("Closed CPE index");
                }
            }
            Err(err) => warn!(error = %err, "Skipping close of poisoned CPE index"),
        }
    }

    /// Whether any opens are outstanding.
    pub fn is_open(&self) -> bool {
        self.inner
            .lock()
            .map(|state| state.users > 0)
            .unwrap_or(false)
    }

    /// Search with a query string; see [`CpeSearcher::search`].
    pub fn search(&self, query_str: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        let state = self.lock()?;
        self.generation(&state)?.searcher.search(query_str, max_results)
    }

    /// Execute a pre-built query; see [`CpeSearcher::search_query`].
    pub fn search_query(
        &self,
        query: &dyn Query,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let state = self.lock()?;
        self.generation(&state)?
            .searcher
            .search_query(query, max_results)
    }

    /// Retrieve the stored values for a document handle from the open
    /// generation.
    pub fn document(&self, address: DocAddress) -> Result<IndexEntry, SearchError> {
        let state = self.lock()?;
        self.generation(&state)?.searcher.document(address)
    }

    /// Number of indexed pairs, or [`NOT_READY`] when no generation is open.
    ///
    /// The sentinel distinguishes "not built" from an empty corpus without
    /// forcing callers through an error path.
    pub fn num_docs(&self) -> i64 {
        match self.inner.lock() {
            Ok(state) => state
                .generation
                .as_ref()
                .map(|generation| generation.searcher.num_docs() as i64)
                .unwrap_or(NOT_READY),
            Err(_) => NOT_READY,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, IndexState>, SearchError> {
        self.inner
            .lock()
            .map_err(|err| SearchError::IndexLocked(err.to_string()))
    }

    fn generation<'a>(
        &self,
        state: &'a MutexGuard<'_, IndexState>,
    ) -> Result<&'a Generation, SearchError> {
        state.generation.as_ref().ok_or(SearchError::Closed)
    }
}
