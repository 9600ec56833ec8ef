//! Intent analysis for the flowmate automation platform.
//!
//! This crate maps free-form natural language to workflow suggestions:
//!
//! - **Intent classification**: ordered keyword rules that propose a
//!   trigger, an optional condition, and an action for a description
//!   like "Send me a Slack message every morning"
//! - **Remote classification**: a capability interface for delegating to
//!   a hosted text-classification model, configured but not implemented
//!   here
//!
//! Suggestions convert directly into workflow drafts consumable by the
//! engine in `flowmate-workflow`.

pub mod error;
pub mod intent;
pub mod remote;

pub use error::RemoteError;
pub use intent::{IntentAnalysis, IntentClassifier, WorkflowSuggestion};
pub use remote::{ClassifyRequest, ClassifyResponse, RemoteClassifier, RemoteConfig};
