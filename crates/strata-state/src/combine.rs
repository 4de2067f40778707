//! Reducer composition and per-dispatch change detection.
//!
//! [`combine`] validates a [`ReducerMap`] and wraps it in a
//! [`CombinedReducer`]: one root transition function that delegates to
//! each keyed reducer, detects which slices actually changed by handle
//! identity, and returns either the prior snapshot itself (when nothing
//! changed) or a fresh snapshot sharing every untouched slice.
//!
//! That identity guarantee is the point of the whole crate: a host that
//! stores the returned snapshot can decide "skip downstream recomputation"
//! with a single pointer comparison instead of a deep diff.

use crate::shape::assert_reducer_shape;
use crate::{Action, ReducerMap, Slice, Snapshot, StrataError, StrataResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Validate a reducer map and compose it into a single root reducer.
///
/// Runs shape validation over every reducer (see the crate docs for the
/// contract); a reducer that cannot initialize its slice aborts
/// composition with [`StrataError::Shape`]. The map is captured by the
/// returned [`CombinedReducer`] and is immutable afterwards; composing a
/// new map is the only way to change the reducer set.
///
/// # Examples
///
/// ```
/// use strata_state::{combine, reducer_map, Action, Slice};
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
/// let root = combine(reducer_map! { "counter" => counter }).unwrap();
/// let s0 = root.reduce(None, &Action::init()).unwrap();
/// let s1 = root.reduce(Some(&s0), &Action::new("INC")).unwrap();
///
/// assert_eq!(s1.get("counter").map(|s| s.as_ref()), Some(&json!(1)));
/// assert!(!s1.ptr_eq(&s0));
/// ```
pub fn combine(reducers: ReducerMap) -> StrataResult<CombinedReducer> {
    assert_reducer_shape(&reducers)?;
    Ok(CombinedReducer {
        reducers,
        unexpected_checked: AtomicBool::new(false),
    })
}

/// The composed root transition function produced by [`combine`].
///
/// Stateless across calls apart from one diagnostic flag: the
/// unexpected-key check runs on the first dispatch only, per instance, so
/// a long-lived dispatch loop is not flooded with repeat warnings.
///
/// Calls must be serialized by a single logical writer (the host dispatch
/// loop); snapshots handed out earlier may be read concurrently from any
/// thread while new dispatches proceed.
#[derive(Debug)]
pub struct CombinedReducer {
    reducers: ReducerMap,
    unexpected_checked: AtomicBool,
}

impl CombinedReducer {
    /// Dispatch one action: delegate to every keyed reducer and assemble
    /// the next snapshot.
    ///
    /// Semantics, in order:
    ///
    /// - A missing `prior` is treated as an empty snapshot, so the first
    ///   dispatch (normally [`Action::init`]) synthesizes every slice.
    /// - Each reducer receives its current slice (`None` when the key is
    ///   absent) and must return the next one. A `None` return fails
    ///   immediately with [`StrataError::UndefinedSlice`] naming the key
    ///   and action kind; remaining keys are not processed and no partial
    ///   state is returned.
    /// - A key counts as changed when the returned handle differs from the
    ///   prior one (`Arc::ptr_eq`) or the key was absent. Absence and
    ///   presence-with-equal-value are never conflated, and slice contents
    ///   are never compared.
    /// - If no key changed, the prior snapshot handle itself is returned
    ///   ([`Snapshot::ptr_eq`] holds). Otherwise a fresh snapshot is built
    ///   from the prior one with only the changed slices rewritten.
    pub fn reduce(&self, prior: Option<&Snapshot>, action: &Action) -> StrataResult<Snapshot> {
        let empty;
        let prior = match prior {
            Some(snapshot) => snapshot,
            None => {
                empty = Snapshot::new();
                &empty
            }
        };

        if !self.unexpected_checked.swap(true, Ordering::Relaxed) {
            warn_unexpected_keys(&self.reducers, prior, action);
        }

        let mut has_changed = false;
        let mut updates: Vec<(String, Slice)> = Vec::new();

        for (key, reducer) in self.reducers.iter() {
            let previous = prior.get(key);
            let next = reducer
                .reduce(previous.cloned(), action)
                .ok_or_else(|| StrataError::undefined_slice(key, action.kind()))?;

            let changed = match previous {
                Some(previous) => !Arc::ptr_eq(previous, &next),
                None => true,
            };
            if changed {
                has_changed = true;
                updates.push((key.to_owned(), next));
            }
        }

        if !has_changed {
            return Ok(prior.clone());
        }
        Ok(prior.with_updates(updates))
    }

    /// Keys of the composed reducer map, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.reducers.keys()
    }

    /// Number of composed reducers.
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Whether the composed map is empty.
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

/// Report prior-state keys that no reducer owns. Usually stale state from
/// before a change to the reducer set; the slices are carried forward
/// untouched by the seeded accumulator.
fn warn_unexpected_keys(reducers: &ReducerMap, prior: &Snapshot, action: &Action) {
    let unexpected: Vec<&str> = prior
        .keys()
        .filter(|key| !reducers.contains_key(key))
        .collect();
    if !unexpected.is_empty() {
        tracing::warn!(
            keys = ?unexpected,
            action_kind = %action.kind(),
            "prior state contains keys with no matching reducer; \
             they will be carried forward but never updated"
        );
    }
}
