use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::topic::Subscriptions;
use crate::value::{StateValue, SubscriptionId};

/// Callback type for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

/// Result of running a reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The action was applied and subscribers are notified.
    Applied,
    /// The action was dropped (stale or a no-op); nothing is written.
    Ignored,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}

/// A typed slice of console state with its reducer.
///
/// Each slice lives at a fixed `PATH`. A missing slice reads as
/// `Self::default()`, so reducers always start from a valid value.
pub trait Slice: Any + Clone + Default + Send + Sync {
    const PATH: &'static str;
    type Action;

    fn reduce(&mut self, action: Self::Action) -> Outcome;
}

/// Path-keyed state store with pattern-based change notifications.
///
/// - `dispatch::<S>(action)` runs a slice reducer under the write lock.
/// - `set(path, value)` stores a raw value and notifies subscribers.
/// - `get(path)` / `slice::<S>()` read the current value.
/// - `subscribe(pattern, handler)` registers a change handler.
///
/// Subscribers are invoked after the write lock is released, so they may
/// read the store freely.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    handlers: Subscriptions<HandlerEntry>,
    next_id: AtomicU64,
}

#[derive(Clone)]
struct HandlerEntry {
    id: SubscriptionId,
    handler: ChangeHandler,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            handlers: Subscriptions::new(),
            next_id: AtomicU64::new(1),
        }
    }

    // ====================================================================
    // Slices
    // ====================================================================

    /// Apply `action` to slice `S` atomically.
    ///
    /// The read-modify-write happens under a single write lock, so two
    /// dispatches on the same slice never interleave.
    pub fn dispatch<S: Slice>(&self, action: S::Action) -> Outcome {
        self.modify::<S, _>(|slice| {
            let outcome = slice.reduce(action);
            (outcome, outcome)
        })
    }

    /// Run an arbitrary mutation on slice `S` under the write lock.
    ///
    /// The closure decides whether the change is committed and may hand a
    /// value back to the caller (e.g. drained items).
    pub fn modify<S, R>(&self, f: impl FnOnce(&mut S) -> (Outcome, R)) -> R
    where
        S: Slice,
    {
        let (committed, result) = {
            let mut values = self.values.write().unwrap();
            let mut slice = values
                .get(S::PATH)
                .and_then(|v| v.downcast_cloned::<S>())
                .unwrap_or_default();
            let (outcome, result) = f(&mut slice);
            if !outcome.is_applied() {
                return result;
            }
            let value = StateValue::new(slice);
            values.insert(S::PATH.to_string(), value.clone());
            (value, result)
        };
        self.notify(S::PATH, &committed);
        result
    }

    /// Read a projection of slice `S`.
    pub fn select<S: Slice, R>(&self, f: impl FnOnce(&S) -> R) -> R {
        match self.get(S::PATH) {
            Some(value) => match value.downcast_ref::<S>() {
                Some(slice) => f(slice),
                None => f(&S::default()),
            },
            None => f(&S::default()),
        }
    }

    /// Clone slice `S` out of the store.
    pub fn slice<S: Slice>(&self) -> S {
        self.select::<S, _>(S::clone)
    }

    /// Replace slice `S` wholesale.
    pub fn install<S: Slice>(&self, slice: S) {
        self.set(S::PATH, slice);
    }

    // ====================================================================
    // Raw values
    // ====================================================================

    /// Set a typed value at `path` and notify matching subscribers.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    pub fn set_value(&self, path: &str, value: StateValue) {
        {
            let mut values = self.values.write().unwrap();
            values.insert(path.to_string(), value.clone());
        }
        self.notify(path, &value);
    }

    pub fn get(&self, path: &str) -> Option<StateValue> {
        let values = self.values.read().unwrap();
        values.get(path).cloned()
    }

    /// Remove the value at `path`. Does not notify subscribers.
    pub fn remove(&self, path: &str) -> Option<StateValue> {
        let mut values = self.values.write().unwrap();
        values.remove(path)
    }

    /// Entries strictly under `{prefix}/`, ordered by path.
    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        let values = self.values.read().unwrap();
        let scan_prefix = format!("{}/", prefix);
        values
            .range(scan_prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&scan_prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values.read().unwrap().contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.values.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> Vec<(String, StateValue)> {
        let values = self.values.read().unwrap();
        values.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    // ====================================================================
    // Subscriptions
    // ====================================================================

    /// Subscribe to changes on paths matching `pattern`.
    ///
    /// The handler runs synchronously on the thread that committed the change.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.insert(
            pattern,
            HandlerEntry {
                id,
                handler: Arc::new(handler),
            },
        );
        id
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) {
        self.handlers.remove(pattern, |entry| entry.id == id);
    }

    fn notify(&self, path: &str, value: &StateValue) {
        for entry in self.handlers.matching(path) {
            (entry.handler)(path, value);
        }
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
