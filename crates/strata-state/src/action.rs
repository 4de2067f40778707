//! Actions: the immutable inputs to every state transition.
//!
//! An [`Action`] is a record with a `type` discriminant (called `kind` here,
//! since `type` is reserved in Rust) and an arbitrary JSON payload. Kinds
//! under the `@@strata/` prefix are reserved for the library itself.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Prefix for action kinds reserved by the library.
pub(crate) const RESERVED_PREFIX: &str = "@@strata/";

/// Kind of the initialization action delivered by hosts on startup.
const INIT_KIND: &str = "@@strata/INIT";

/// An immutable dispatched action.
///
/// Serializes with the discriminant under the conventional `"type"` field;
/// a null payload is omitted on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    payload: Value,
}

impl Action {
    /// Create an action with the given kind and no payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Value::Null,
        }
    }

    /// Create an action carrying a payload.
    pub fn with_payload(kind: impl Into<String>, payload: impl Into<Value>) -> Self {
        Self {
            kind: kind.into(),
            payload: payload.into(),
        }
    }

    /// The initialization action.
    ///
    /// Hosts deliver this once on startup so every reducer can synthesize
    /// its initial slice. Its kind is reserved; application actions must
    /// not use the `@@strata/` prefix.
    pub fn init() -> Self {
        Action::new(INIT_KIND)
    }

    /// Create the randomized unknown-action probe used by shape validation.
    ///
    /// The random suffix guarantees no reducer can recognize it, which is
    /// the point: a conforming reducer must return its input unchanged.
    pub(crate) fn probe_unknown() -> Self {
        Action::new(format!("{RESERVED_PREFIX}PROBE_UNKNOWN_ACTION_{}", Uuid::new_v4()))
    }

    /// The discriminant of this action.
    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The payload of this action (`Value::Null` when absent).
    #[inline]
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Whether this action uses a kind reserved by the library.
    #[inline]
    pub fn is_reserved(&self) -> bool {
        self.kind.starts_with(RESERVED_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_has_null_payload() {
        let action = Action::new("INC");
        assert_eq!(action.kind(), "INC");
        assert!(action.payload().is_null());
        assert!(!action.is_reserved());
    }

    #[test]
    fn test_with_payload() {
        let action = Action::with_payload("ADD_TODO", json!({"text": "write tests"}));
        assert_eq!(action.kind(), "ADD_TODO");
        assert_eq!(action.payload()["text"], "write tests");
    }

    #[test]
    fn test_init_is_reserved() {
        let init = Action::init();
        assert!(init.is_reserved());
        assert_eq!(init.kind(), "@@strata/INIT");
    }

    #[test]
    fn test_probe_unknown_is_reserved_and_unique() {
        let a = Action::probe_unknown();
        let b = Action::probe_unknown();
        assert!(a.is_reserved());
        assert!(b.is_reserved());
        assert_ne!(a.kind(), b.kind());
    }

    #[test]
    fn test_serde_uses_type_field() {
        let action = Action::with_payload("INC", json!({"by": 2}));
        let encoded = serde_json::to_value(&action).unwrap();
        assert_eq!(encoded["type"], "INC");
        assert_eq!(encoded["payload"]["by"], 2);

        let decoded: Action = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, action);
    }

    #[test]
    fn test_serde_omits_null_payload() {
        let encoded = serde_json::to_value(Action::new("NOOP")).unwrap();
        assert!(encoded.get("payload").is_none());

        let decoded: Action = serde_json::from_value(json!({"type": "NOOP"})).unwrap();
        assert!(decoded.payload().is_null());
    }
}
