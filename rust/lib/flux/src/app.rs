use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use crate::router::Router;
use crate::store::{Outcome, Slice, StateStore};
use crate::value::{StateValue, SubscriptionId};

/// Flux: the console's state engine.
///
/// Three path-based primitives:
/// - `slice::<S>()` / `get(path)` read state
/// - `emit(path, payload)` routes a request to its handler(s)
/// - `subscribe(pattern, f)` observes state changes
///
/// ```ignore
/// let flux = Flux::new();
/// flux.on("qr/list", |_path, payload, store| async move { /* fetch, dispatch */ });
/// flux.subscribe("qr/state", |_path, value| { /* re-render */ });
/// flux.emit("qr/list", ListQrRequest::default()).await;
/// let qr = flux.slice::<QrSlice>();
/// ```
pub struct Flux {
    store: Arc<StateStore>,
    router: Router,
}

impl Flux {
    pub fn new() -> Self {
        Self::with_store(Arc::new(StateStore::new()))
    }

    /// Wrap an existing store, e.g. one shared with a background task.
    pub fn with_store(store: Arc<StateStore>) -> Self {
        Self {
            store,
            router: Router::new(),
        }
    }

    // ====================================================================
    // State
    // ====================================================================

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.store.get(path)
    }

    /// Current value of slice `S` (default if never written).
    pub fn slice<S: Slice>(&self) -> S {
        self.store.slice::<S>()
    }

    pub fn select<S: Slice, R>(&self, f: impl FnOnce(&S) -> R) -> R {
        self.store.select::<S, R>(f)
    }

    pub fn dispatch<S: Slice>(&self, action: S::Action) -> Outcome {
        self.store.dispatch::<S>(action)
    }

    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        self.store.scan(prefix)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.store.contains(path)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn snapshot(&self) -> Vec<(String, StateValue)> {
        self.store.snapshot()
    }

    // ====================================================================
    // Requests
    // ====================================================================

    /// Emit a request and wait for every matching handler to finish.
    pub async fn emit<T: Any + Send + Sync>(&self, path: &str, payload: T) {
        self.emit_arc(path, Arc::new(payload)).await;
    }

    pub async fn emit_arc(&self, path: &str, payload: Arc<dyn Any + Send + Sync>) {
        tracing::trace!(path, "emit");
        self.router
            .dispatch(path, payload, Arc::clone(&self.store))
            .await;
    }

    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Arc<dyn Any + Send + Sync>, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.router.on(pattern, handler);
    }

    pub fn has_handler(&self, path: &str) -> bool {
        self.router.matches(path)
    }

    // ====================================================================
    // Subscriptions
    // ====================================================================

    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        self.store.subscribe(pattern, handler)
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) {
        self.store.unsubscribe(pattern, id);
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }
}

impl Default for Flux {
    fn default() -> Self {
        Self::new()
    }
}
