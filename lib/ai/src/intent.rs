//! Keyword-rule intent classification.
//!
//! Maps a free-form description to a suggested workflow: a trigger, an
//! optional condition, and an action. Each facet is detected by its own
//! ordered list of keyword rules, evaluated first-match-wins over the
//! lower-cased input; keyword matching is substring matching, so `"if"`
//! also matches inside longer words, exactly like the comparisons it
//! replaces.

use crate::error::RemoteError;
use crate::remote::{ClassifyRequest, ClassifyResponse, RemoteClassifier};
use flowmate_workflow::action::{ActionKind, ActionSpec};
use flowmate_workflow::condition::{ConditionOperator, ConditionSpec};
use flowmate_workflow::definition::WorkflowDraft;
use flowmate_workflow::trigger::{Schedule, TriggerSpec};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An ordered keyword rule: if any keyword occurs in the input, the rule
/// fires and produces its suggestion.
struct KeywordRule<T> {
    keywords: &'static [&'static str],
    build: fn() -> T,
}

impl<T> KeywordRule<T> {
    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }
}

fn first_match<T>(rules: &[KeywordRule<T>], text: &str, default: fn() -> T) -> T {
    rules
        .iter()
        .find(|rule| rule.matches(text))
        .map_or_else(default, |rule| (rule.build)())
}

fn daily_trigger() -> TriggerSpec {
    TriggerSpec::scheduled(Schedule::Daily)
        .with_name("Scheduled (Daily)")
        .with_icon("fas fa-clock")
}

fn hourly_trigger() -> TriggerSpec {
    TriggerSpec::scheduled(Schedule::Hourly)
        .with_name("Scheduled (Hourly)")
        .with_icon("fas fa-clock")
}

fn event_trigger() -> TriggerSpec {
    TriggerSpec::event()
        .with_name("Event Trigger")
        .with_icon("fas fa-bolt")
}

fn manual_trigger() -> TriggerSpec {
    TriggerSpec::manual()
        .with_name("Manual Trigger")
        .with_icon("fas fa-hand-pointer")
}

const TRIGGER_RULES: &[KeywordRule<TriggerSpec>] = &[
    KeywordRule {
        keywords: &["every day", "daily", "morning", "evening", "night"],
        build: daily_trigger,
    },
    KeywordRule {
        keywords: &["every hour", "hourly"],
        build: hourly_trigger,
    },
    KeywordRule {
        keywords: &["when", "whenever", "if", "after"],
        build: event_trigger,
    },
];

fn send_email_action() -> ActionSpec {
    ActionSpec::new(ActionKind::SendEmail)
        .with_name("Send Email")
        .with_icon("fas fa-envelope")
}

fn slack_message_action() -> ActionSpec {
    ActionSpec::new(ActionKind::SlackMessage)
        .with_name("Send Slack Message")
        .with_icon("fab fa-slack")
}

fn create_task_action() -> ActionSpec {
    ActionSpec::new(ActionKind::CreateTask)
        .with_name("Create Task")
        .with_icon("fas fa-tasks")
}

fn http_request_action() -> ActionSpec {
    ActionSpec::new(ActionKind::HttpRequest)
        .with_name("HTTP Request")
        .with_icon("fas fa-globe")
}

fn log_data_action() -> ActionSpec {
    ActionSpec::new(ActionKind::LogData)
        .with_name("Log Data")
        .with_icon("fas fa-database")
}

// Priority order matters: "email message" should suggest email, not
// Slack.
const ACTION_RULES: &[KeywordRule<ActionSpec>] = &[
    KeywordRule {
        keywords: &["email", "mail", "send email"],
        build: send_email_action,
    },
    KeywordRule {
        keywords: &["slack", "message", "notify", "alert"],
        build: slack_message_action,
    },
    KeywordRule {
        keywords: &["task", "todo", "create", "add"],
        build: create_task_action,
    },
    KeywordRule {
        keywords: &["api", "webhook", "http", "request", "call"],
        build: http_request_action,
    },
];

const CONDITION_KEYWORDS: &[&str] = &["if", "only if", "when", "check"];

fn synthetic_condition() -> ConditionSpec {
    ConditionSpec::new("status", ConditionOperator::Equals, "active")
}

/// A suggested workflow shape, directly convertible into a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSuggestion {
    /// Suggested trigger, with display name and icon hint.
    pub trigger: TriggerSpec,
    /// Suggested condition, when the text implies one.
    pub condition: Option<ConditionSpec>,
    /// Suggested action, with display name and icon hint.
    pub action: ActionSpec,
}

impl From<WorkflowSuggestion> for WorkflowDraft {
    fn from(suggestion: WorkflowSuggestion) -> Self {
        Self {
            id: None,
            name: None,
            trigger: suggestion.trigger,
            condition: suggestion.condition,
            action: suggestion.action,
        }
    }
}

/// The result of analyzing a free-form description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentAnalysis {
    /// The analyzed input, verbatim.
    pub original_text: String,
    /// The suggested workflow shape.
    pub suggestion: WorkflowSuggestion,
    /// Cosmetic confidence in `[0.75, 0.95]`; not a computed
    /// probability.
    pub confidence: f64,
}

impl IntentAnalysis {
    /// Converts the suggestion into a workflow draft.
    #[must_use]
    pub fn into_draft(self) -> WorkflowDraft {
        self.suggestion.into()
    }
}

/// Rule-based mapper from free text to workflow suggestions.
///
/// Optionally delegates to a [`RemoteClassifier`] for hosted
/// classification; local keyword analysis needs no backend.
#[derive(Default)]
pub struct IntentClassifier {
    remote: Option<Box<dyn RemoteClassifier>>,
}

impl IntentClassifier {
    /// Creates a classifier with no remote backend.
    #[must_use]
    pub fn new() -> Self {
        Self { remote: None }
    }

    /// Attaches a remote classification backend.
    #[must_use]
    pub fn with_remote(mut self, remote: Box<dyn RemoteClassifier>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Analyzes a description and suggests a workflow shape.
    #[must_use]
    pub fn analyze(&self, text: &str) -> IntentAnalysis {
        let lowered = text.to_lowercase();

        let trigger = first_match(TRIGGER_RULES, &lowered, manual_trigger);
        let action = first_match(ACTION_RULES, &lowered, log_data_action);
        let condition = CONDITION_KEYWORDS
            .iter()
            .any(|keyword| lowered.contains(keyword))
            .then(synthetic_condition);

        debug!(
            trigger = %trigger.kind.name(),
            action = %action.kind.name(),
            has_condition = condition.is_some(),
            "analyzed intent"
        );

        IntentAnalysis {
            original_text: text.to_string(),
            suggestion: WorkflowSuggestion {
                trigger,
                condition,
                action,
            },
            confidence: rand::thread_rng().gen_range(0.75..0.95),
        }
    }

    /// Delegates classification to the attached remote backend.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::NotConfigured`] when no backend is
    /// attached, or the backend's own error.
    pub fn classify_remote(&self, text: &str) -> Result<ClassifyResponse, RemoteError> {
        let Some(remote) = &self.remote else {
            return Err(RemoteError::NotConfigured);
        };
        remote.classify(&ClassifyRequest::new(text))
    }
}
