use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::store::StateStore;
use crate::topic::Subscriptions;

/// A boxed, `Send`-able future returned by request handlers.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type-erased handler stored in the router.
///
/// Arguments are owned so the returned future can be `'static`:
/// the matched request path, the erased payload, and the store.
type ErasedHandler =
    Arc<dyn Fn(String, Arc<dyn Any + Send + Sync>, Arc<StateStore>) -> BoxFuture + Send + Sync>;

/// Maps request paths (e.g. `qr/list`, `eventTypes/delete`) to async handlers.
///
/// Several handlers may match one path through wildcards; they run one
/// after another in registration order.
///
/// ```ignore
/// router.on("qr/delete", |_path, payload, store| async move {
///     let Some(req) = payload.downcast_ref::<DeleteQrRequest>() else { return };
///     store.dispatch::<QrSlice>(QrAction::Removed(req.qr_id.clone()));
/// });
/// router.dispatch("qr/delete", Arc::new(req), store).await;
/// ```
pub struct Router {
    handlers: Subscriptions<ErasedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            handlers: Subscriptions::new(),
        }
    }

    /// Register an async handler for a path pattern (`+` and `#` allowed).
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Arc<dyn Any + Send + Sync>, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler: ErasedHandler = Arc::new(
            move |path: String,
                  payload: Arc<dyn Any + Send + Sync>,
                  store: Arc<StateStore>|
                  -> BoxFuture { Box::pin(handler(path, payload, store)) },
        );
        self.handlers.insert(pattern, handler);
    }

    /// Run every handler matching `path`. No match is a no-op.
    pub async fn dispatch(
        &self,
        path: &str,
        payload: Arc<dyn Any + Send + Sync>,
        store: Arc<StateStore>,
    ) {
        let handlers = self.handlers.matching(path);
        if handlers.is_empty() {
            tracing::debug!(path, "no handler registered");
        }
        for handler in handlers {
            handler(path.to_string(), Arc::clone(&payload), Arc::clone(&store)).await;
        }
    }

    /// Whether a handler is registered under exactly `pattern`.
    pub fn has_handler(&self, pattern: &str) -> bool {
        self.handlers.has_pattern(pattern)
    }

    /// Whether any handler would run for `path`.
    pub fn matches(&self, path: &str) -> bool {
        !self.handlers.matching(path).is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    fn test_store() -> Arc<StateStore> {
        Arc::new(StateStore::new())
    }

    #[tokio::test]
    async fn dispatch_exact_match() {
        let router = Router::new();
        let called = Arc::new(AtomicU64::new(0));
        let c = called.clone();
        router.on("qr/list", move |_path, _payload, _store| {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::Relaxed);
            }
        });

        router.dispatch("qr/list", Arc::new(()), test_store()).await;
        router.dispatch("qr/create", Arc::new(()), test_store()).await;
        assert_eq!(called.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn handler_receives_path_and_payload() {
        struct DeleteRequest {
            qr_id: String,
        }

        let router = Router::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        router.on("qr/+", move |path, payload, _store| {
            let s = s.clone();
            async move {
                if let Some(req) = payload.downcast_ref::<DeleteRequest>() {
                    s.lock().unwrap().push(format!("{path}:{}", req.qr_id));
                }
            }
        });

        let req = DeleteRequest {
            qr_id: "qr-7".into(),
        };
        router.dispatch("qr/delete", Arc::new(req), test_store()).await;
        assert_eq!(*seen.lock().unwrap(), vec!["qr/delete:qr-7".to_string()]);
    }

    #[tokio::test]
    async fn handlers_write_to_store() {
        let router = Router::new();
        router.on("app/ping", |_path, _payload, store| async move {
            store.set("app/pong", true);
        });

        let store = test_store();
        router.dispatch("app/ping", Arc::new(()), store.clone()).await;
        assert_eq!(store.get("app/pong").unwrap().downcast_ref::<bool>(), Some(&true));
    }

    #[tokio::test]
    async fn matching_handlers_run_in_registration_order() {
        let router = Router::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for (pattern, tag) in [("#", "all"), ("eventTypes/+", "one"), ("eventTypes/update", "exact")] {
            let o = order.clone();
            router.on(pattern, move |_path, _payload, _store| {
                let o = o.clone();
                async move {
                    o.lock().unwrap().push(tag);
                }
            });
        }

        router.dispatch("eventTypes/update", Arc::new(()), test_store()).await;
        assert_eq!(*order.lock().unwrap(), vec!["all", "one", "exact"]);
    }

    #[test]
    fn has_handler_vs_matches() {
        let router = Router::new();
        router.on("auth/#", |_p, _v, _s| async {});
        assert!(router.has_handler("auth/#"));
        assert!(!router.has_handler("auth/logout"));
        assert!(router.matches("auth/logout"));
        assert!(!router.matches("qr/list"));
    }
}
