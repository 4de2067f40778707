//! Keyed reducer composition over persistent, structurally-shared snapshots.
//!
//! `strata-state` composes many independent, keyed state-transition
//! functions ("reducers") into one root transition function operating over
//! a single immutable [`Snapshot`]. Hosts keep application state as one
//! snapshot and detect "nothing changed" with a pointer comparison, so
//! downstream consumers can skip recomputation entirely.
//!
//! # Core Concepts
//!
//! - **[`Reducer`]**: pure function `(Option<Slice>, &Action) -> Option<Slice>`
//!   over one keyed slice of state
//! - **[`ReducerMap`]**: insertion-ordered mapping from key to reducer
//! - **[`combine()`]**: validates the map and produces a [`CombinedReducer`]
//! - **[`Snapshot`]**: persistent keyed container; derived snapshots share
//!   every untouched slice with their parent
//! - **[`Action`]**: immutable record with a `type` discriminant and an
//!   arbitrary payload
//!
//! # Change Detection
//!
//! ```text
//! next = root.reduce(Some(&prior), &action)?
//! next.ptr_eq(&prior)  ⇔  no reducer changed its slice
//! ```
//!
//! A dispatch that changes nothing returns the prior snapshot handle
//! itself, never a structurally-equal copy. A dispatch that changes one
//! slice returns a fresh snapshot in which every other slice is the same
//! `Arc` handle as before. Change is judged by handle identity only;
//! slice contents are never compared.
//!
//! # Quick Start
//!
//! ```
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//! use strata_state::{combine, reducer_map, Action, Slice};
//!
//! fn counter(slice: Option<Slice>, action: &Action) -> Option<Slice> {
//!     let current = slice.as_deref().and_then(Value::as_i64).unwrap_or(0);
//!     match action.kind() {
//!         "INC" => Some(Arc::new(json!(current + 1))),
//!         _ => Some(slice.unwrap_or_else(|| Arc::new(json!(0)))),
//!     }
//! }
//!
//! let root = combine(reducer_map! { "counter" => counter }).unwrap();
//!
//! // The host delivers the init action once on startup.
//! let s0 = root.reduce(None, &Action::init()).unwrap();
//! assert_eq!(s0.get("counter").map(|s| s.as_ref()), Some(&json!(0)));
//!
//! let s1 = root.reduce(Some(&s0), &Action::new("INC")).unwrap();
//! assert_eq!(s1.get("counter").map(|s| s.as_ref()), Some(&json!(1)));
//! assert!(!s1.ptr_eq(&s0));
//!
//! // Nothing recognized this action: the same handle comes back.
//! let s2 = root.reduce(Some(&s1), &Action::new("NOOP")).unwrap();
//! assert!(s2.ptr_eq(&s1));
//! ```
//!
//! # The Reducer Contract
//!
//! Two behavioral clauses cannot be expressed in the type system and are
//! checked at composition time by probing each reducer with sentinel
//! actions (see [`combine()`]):
//!
//! 1. A reducer must never return `None`. Given absent input and an
//!    unrecognized action it must synthesize its initial slice; violating
//!    this during probing aborts composition with [`StrataError::Shape`],
//!    and during dispatch fails with [`StrataError::UndefinedSlice`].
//! 2. A reducer must return its input slice handle unchanged for actions
//!    it does not recognize. Violations are reported through the
//!    diagnostic log at composition time.
//!
//! Reducers must be pure; the combiner performs no locking and expects
//! dispatches to arrive serialized from a single logical writer, while
//! snapshots handed out earlier may be read from any thread.

mod action;
mod combine;
mod error;
mod reducer;
mod shape;
mod snapshot;

pub use action::Action;
pub use combine::{combine, CombinedReducer};
pub use error::{StrataError, StrataResult};
pub use reducer::{Reducer, ReducerMap};
pub use snapshot::{Slice, Snapshot};

// Re-export serde_json::Value for convenience
pub use serde_json::Value;
