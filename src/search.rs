//! Search state machine
//!
//! Drives `Idle -> Loading -> Success | Error` from debounced text input and
//! service completions. Requests run on spawned tasks and report back through
//! a channel; `poll` applies them on the caller's context. Each request is
//! tagged with a generation and only the newest generation is applied, so a
//! slow early response can never overwrite a later one.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::MovieService;
use crate::models::{SearchError, SearchResponse, SearchResult};

/// Quiet period after the last keystroke before a search fires
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Queries must be strictly longer than this to be sent
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;

// =============================================================================
// Search State
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Success(SearchResponse),
    Error(SearchError),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SearchState::Idle)
    }

    /// Results to list; empty outside `Success`
    pub fn results(&self) -> &[SearchResult] {
        match self {
            SearchState::Success(response) => &response.results,
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            SearchState::Error(e) => Some(e.to_string()),
            _ => None,
        }
    }
}

// =============================================================================
// Debouncer
// =============================================================================

/// Holds the latest input until it has been quiet for `delay`
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record input, restarting the quiet period
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now + self.delay));
    }

    /// Take the pending input once its deadline has passed
    pub fn fire(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(text, _)| text),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

// =============================================================================
// State Machine
// =============================================================================

#[derive(Debug)]
struct Completion {
    generation: u64,
    result: Result<SearchResponse, SearchError>,
}

pub struct SearchMachine {
    state: SearchState,
    service: Arc<dyn MovieService>,
    debouncer: Debouncer,
    min_query_len: usize,
    generation: u64,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl SearchMachine {
    pub fn new(service: Arc<dyn MovieService>) -> Self {
        Self::with_settings(service, DEFAULT_DEBOUNCE, DEFAULT_MIN_QUERY_LEN)
    }

    pub fn with_settings(
        service: Arc<dyn MovieService>,
        debounce: Duration,
        min_query_len: usize,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: SearchState::Idle,
            service,
            debouncer: Debouncer::new(debounce),
            min_query_len,
            generation: 0,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn min_query_len(&self) -> usize {
        self.min_query_len
    }

    /// The search box changed
    pub fn input(&mut self, text: &str, now: Instant) {
        self.debouncer.input(text, now);
    }

    /// Fire debounced input if due. Returns true if the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.fire(now) {
            Some(text) => self.submit(&text),
            None => false,
        }
    }

    /// Apply a query right away: search if long enough, otherwise go idle.
    pub fn submit(&mut self, text: &str) -> bool {
        self.debouncer.cancel();
        if text.chars().count() > self.min_query_len {
            self.search_now(text);
            true
        } else {
            // Outstanding requests belong to an older query now
            self.generation += 1;
            let changed = !self.state.is_idle();
            self.state = SearchState::Idle;
            changed
        }
    }

    /// Issue a search for `term` without debounce or length checks
    pub fn search_now(&mut self, term: &str) {
        self.debouncer.cancel();
        self.generation += 1;
        self.state = SearchState::Loading;

        let generation = self.generation;
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        let term = term.to_string();
        info!(term = %term, generation, "search issued");

        tokio::spawn(async move {
            let result = service.search(&term).await;
            // Receiver gone means the screen closed
            let _ = tx.send(Completion { generation, result });
        });
    }

    /// Apply all completions that have arrived. Returns true if the state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.rx.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    /// Wait for the next completion and apply it. Returns false if it was stale.
    pub async fn wait(&mut self) -> bool {
        match self.rx.recv().await {
            Some(completion) => self.apply(completion),
            None => false,
        }
    }

    fn apply(&mut self, completion: Completion) -> bool {
        if completion.generation != self.generation {
            debug!(
                generation = completion.generation,
                latest = self.generation,
                "discarding stale search result"
            );
            return false;
        }

        // Services may hand back an unsuccessful envelope as Ok
        self.state = match completion.result.and_then(SearchResponse::into_result) {
            Ok(response) => SearchState::Success(response),
            Err(e) => SearchState::Error(e),
        };
        true
    }
}

impl std::fmt::Debug for SearchMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchMachine")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("min_query_len", &self.min_query_len)
            .field("debouncer", &self.debouncer)
            .finish()
    }
}
