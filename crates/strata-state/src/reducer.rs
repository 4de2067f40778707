//! Reducer contract and the keyed reducer mapping.
//!
//! A [`Reducer`] is a pure transition function over one keyed slice of
//! state. The contract has two behavioral clauses no type can enforce:
//! never return `None`, and return the input slice handle unchanged for
//! actions the reducer does not recognize. Both are checked at composition
//! time by probing (see [`crate::combine()`]).

use crate::{Action, Slice};
use std::fmt;

/// Pure state-transition function over one slice.
///
/// Given the current slice (`None` when the key has never been populated)
/// and an action, produce the next slice. Implementations must be pure:
/// no side effects, same output for same input.
///
/// Any `Fn(Option<Slice>, &Action) -> Option<Slice> + Send + Sync` closure
/// or fn item is a reducer:
///
/// ```
/// use strata_state::{Action, Reducer, Slice};
/// use serde_json::{json, Value};
/// use std::sync::Arc;
///
/// fn counter(slice: Option<Slice>, action: &Action) -> Option<Slice> {
///     let current = slice.as_deref().and_then(Value::as_i64).unwrap_or(0);
///     match action.kind() {
///         "INC" => Some(Arc::new(json!(current + 1))),
///         _ => Some(slice.unwrap_or_else(|| Arc::new(json!(0)))),
///     }
/// }
///
/// let next = counter.reduce(None, &Action::new("INC")).unwrap();
/// assert_eq!(next.as_ref(), &json!(1));
/// ```
pub trait Reducer: Send + Sync {
    /// Compute the next slice for the given action.
    fn reduce(&self, slice: Option<Slice>, action: &Action) -> Option<Slice>;
}

impl<F> Reducer for F
where
    F: Fn(Option<Slice>, &Action) -> Option<Slice> + Send + Sync,
{
    fn reduce(&self, slice: Option<Slice>, action: &Action) -> Option<Slice> {
        self(slice, action)
    }
}

/// Insertion-ordered mapping from state key to reducer.
///
/// Keys are unique; inserting an existing key replaces its reducer while
/// keeping the original position. Iteration order is insertion order,
/// which fixes the order of shape probing and of per-key delegation
/// during dispatch.
#[derive(Default)]
pub struct ReducerMap {
    entries: Vec<(String, Box<dyn Reducer>)>,
}

impl ReducerMap {
    /// Create an empty reducer map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a reducer under `key`, replacing any existing one in place.
    pub fn insert(&mut self, key: impl Into<String>, reducer: impl Reducer + 'static) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = Box::new(reducer),
            None => self.entries.push((key, Box::new(reducer))),
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, reducer: impl Reducer + 'static) -> Self {
        self.insert(key, reducer);
        self
    }

    /// Look up a reducer by key.
    pub fn get(&self, key: &str) -> Option<&dyn Reducer> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, r)| r.as_ref())
    }

    /// Whether the map holds the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k.as_str() == key)
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over `(key, reducer)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Reducer)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r.as_ref()))
    }

    /// Number of reducers held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no reducers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Reducers are opaque; Debug shows the key set only.
impl fmt::Debug for ReducerMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerMap")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Construct a [`ReducerMap`] from `key => reducer` pairs.
///
/// # Examples
///
/// ```
/// use strata_state::{reducer_map, Action, Slice};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// fn initialized(slice: Option<Slice>, _action: &Action) -> Option<Slice> {
///     Some(slice.unwrap_or_else(|| Arc::new(json!(null))))
/// }
///
/// let map = reducer_map! {
///     "session" => initialized,
///     "todos" => initialized,
/// };
/// assert_eq!(map.keys().collect::<Vec<_>>(), vec!["session", "todos"]);
/// ```
#[macro_export]
macro_rules! reducer_map {
    () => {
        $crate::ReducerMap::new()
    };
    ($($key:expr => $reducer:expr),+ $(,)?) => {{
        let mut map = $crate::ReducerMap::new();
        $(
            map.insert($key, $reducer);
        )+
        map
    }};
}
