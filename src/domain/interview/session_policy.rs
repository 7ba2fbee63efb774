//! Handling of session ids the store does not know.

use serde::{Deserialize, Serialize};

/// What a mutating request does with an unknown session id.
///
/// Applies to every path that changes state (answer, skip, restart, chat).
/// Read-only paths always report the session as missing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnknownSessionPolicy {
    /// Report "session not found".
    #[default]
    Reject,
    /// Silently start a fresh session under that id.
    Create,
}

impl UnknownSessionPolicy {
    pub fn creates(&self) -> bool {
        matches!(self, UnknownSessionPolicy::Create)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rejects() {
        assert_eq!(UnknownSessionPolicy::default(), UnknownSessionPolicy::Reject);
        assert!(!UnknownSessionPolicy::Reject.creates());
        assert!(UnknownSessionPolicy::Create.creates());
    }

    #[test]
    fn deserializes_lowercase() {
        let policy: UnknownSessionPolicy = serde_json::from_str("\"create\"").unwrap();
        assert_eq!(policy, UnknownSessionPolicy::Create);
    }
}
