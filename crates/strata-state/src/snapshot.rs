//! Persistent keyed container with structural sharing.
//!
//! A [`Snapshot`] maps string keys to immutable slices. Mutation-like
//! operations return a new snapshot; the original is never touched. Slices
//! are `Arc`-backed, so a derived snapshot shares every unmodified slice
//! with its parent and "did anything change" reduces to a pointer
//! comparison.
//!
//! `Serialize` is intentionally **not** implemented: snapshots are
//! in-memory working state, and persistence belongs to the host.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A single keyed sub-state value held by a [`Snapshot`].
///
/// Two slices are "the same" when their handles point at the same
/// allocation (`Arc::ptr_eq`), not when their contents compare equal.
pub type Slice = Arc<Value>;

/// Persistent, structurally-shared keyed container.
///
/// Cloning a snapshot is cheap (one `Arc` bump) and yields a handle to the
/// exact same container; [`Snapshot::ptr_eq`] detects that. [`Snapshot::set`]
/// produces a new container sharing every untouched slice with the
/// original.
///
/// # Examples
///
/// ```
/// use strata_state::Snapshot;
/// use serde_json::json;
///
/// let s0 = Snapshot::new();
/// let s1 = s0.set("counter", json!(0));
/// let s2 = s1.set("counter", json!(1));
///
/// assert!(s0.is_empty());
/// assert_eq!(s1.get("counter").map(|s| s.as_ref()), Some(&json!(0)));
/// assert_eq!(s2.get("counter").map(|s| s.as_ref()), Some(&json!(1)));
/// assert!(!s2.ptr_eq(&s1));
/// ```
#[derive(Clone, Default)]
pub struct Snapshot {
    inner: Arc<BTreeMap<String, Slice>>,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a slice by key. Absent keys return `None`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Slice> {
        self.inner.get(key)
    }

    /// Non-destructively set a key, returning the updated snapshot.
    ///
    /// The original snapshot is unchanged; all other slices are shared by
    /// handle between the two.
    #[must_use]
    pub fn set(&self, key: impl Into<String>, value: impl Into<Slice>) -> Snapshot {
        self.with_updates([(key.into(), value.into())])
    }

    /// Build a derived snapshot with a batch of slice updates.
    ///
    /// One container clone regardless of how many keys change; used by the
    /// combiner so a dispatch touching many slices stays linear.
    pub(crate) fn with_updates(
        &self,
        updates: impl IntoIterator<Item = (String, Slice)>,
    ) -> Snapshot {
        let mut map = (*self.inner).clone();
        for (key, slice) in updates {
            map.insert(key, slice);
        }
        Snapshot {
            inner: Arc::new(map),
        }
    }

    /// Iterate over the keys of this snapshot.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Iterate over `(key, slice)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Slice)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether the snapshot holds the given key.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Number of slices held.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the snapshot holds no slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Whether two handles refer to the exact same container.
    ///
    /// This is the cheap "nothing changed" test the combiner guarantees:
    /// a dispatch that changes no slice returns a handle for which this
    /// holds against the prior snapshot.
    #[inline]
    pub fn ptr_eq(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Structural (value) equality, for tests and hosts. Change detection in
/// the combiner never uses this; it relies on handle identity only.
impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.inner.iter().map(|(k, v)| (k, v.as_ref())))
            .finish()
    }
}

impl<K: Into<String>, V: Into<Slice>> FromIterator<(K, V)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Snapshot {
            inner: Arc::new(
                iter.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}
