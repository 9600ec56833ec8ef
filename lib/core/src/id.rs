//! Strongly-typed ID types for domain entities.
//!
//! IDs wrap ULIDs (Universally Unique Lexicographically Sortable
//! Identifiers), so every ID carries its creation time and sorts in
//! creation order. Workflow IDs generated at load time therefore encode
//! when the workflow was loaded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

/// Generates a strongly-typed ID wrapper around ULID.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Ulid);

        impl $name {
            /// Creates a new ID stamped with the current time.
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }

            /// Creates an ID from an existing ULID.
            #[must_use]
            pub const fn from_ulid(ulid: Ulid) -> Self {
                Self(ulid)
            }

            /// Returns the underlying ULID.
            #[must_use]
            pub const fn as_ulid(&self) -> Ulid {
                self.0
            }

            /// Returns the creation time encoded in the ID, as Unix
            /// milliseconds.
            #[must_use]
            pub fn timestamp_ms(&self) -> u64 {
                self.0.timestamp_ms()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Accept both the prefixed display form and a raw ULID.
                let prefixed = concat!($prefix, "_");
                let ulid_str = s.strip_prefix(prefixed).unwrap_or(s);

                Ulid::from_str(ulid_str).map(Self).map_err(|e| ParseIdError {
                    id_type: stringify!($name),
                    reason: e.to_string(),
                })
            }
        }

        impl From<Ulid> for $name {
            fn from(ulid: Ulid) -> Self {
                Self(ulid)
            }
        }

        impl From<$name> for Ulid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a workflow definition.
    WorkflowId,
    "wf"
);

entity_id!(
    /// Unique identifier for a single execution of a workflow.
    ExecutionId,
    "exec"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_id_display_format() {
        let id = WorkflowId::new();
        assert!(id.to_string().starts_with("wf_"));
    }

    #[test]
    fn execution_id_display_format() {
        let id = ExecutionId::new();
        assert!(id.to_string().starts_with("exec_"));
    }

    #[test]
    fn parse_roundtrip_with_prefix() {
        let id = WorkflowId::new();
        let parsed: WorkflowId = id.to_string().parse().expect("should parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_raw_ulid() {
        let ulid = Ulid::new();
        let id: ExecutionId = ulid.to_string().parse().expect("should parse");
        assert_eq!(id.as_ulid(), ulid);
    }

    #[test]
    fn parse_invalid_ulid() {
        let result: Result<WorkflowId, _> = "definitely-not-a-ulid".parse();
        let err = result.unwrap_err();
        assert_eq!(err.id_type, "WorkflowId");
    }

    #[test]
    fn ids_encode_creation_time() {
        let before = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock before epoch")
            .as_millis() as u64;
        let id = WorkflowId::new();
        assert!(id.timestamp_ms() >= before);
    }

    #[test]
    fn id_serde_roundtrip() {
        let id = ExecutionId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        let parsed: ExecutionId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, parsed);
    }
}
