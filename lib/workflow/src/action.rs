//! Action types, handlers, and the dispatch registry.
//!
//! An action is the side-effecting step executed once the trigger and
//! condition gates pass. Handlers are registered by kind name in an
//! [`ActionRegistry`]; dispatching an unregistered kind falls back to the
//! log-data handler. The built-in handlers simulate their side effects:
//! each waits out a bounded latency drawn from the registry's
//! [`LatencyModel`], emits a single log line, and reports success.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;

/// Handler-specific configuration attached to an action.
pub type ActionConfig = serde_json::Map<String, JsonValue>;

/// The kind of action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Send an email.
    SendEmail,
    /// Post a Slack message.
    SlackMessage,
    /// Create a task.
    CreateTask,
    /// Issue an HTTP request.
    HttpRequest,
    /// Log the configured data.
    LogData,
    /// Catch-all for unrecognized action identifiers in submitted
    /// definitions. Dispatches to the log-data fallback.
    #[serde(other)]
    Unknown,
}

impl ActionKind {
    /// Returns the registry key for this kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SendEmail => "send_email",
            Self::SlackMessage => "slack_message",
            Self::CreateTask => "create_task",
            Self::HttpRequest => "http_request",
            Self::LogData => "log_data",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for ActionKind {
    fn default() -> Self {
        Self::LogData
    }
}

/// An action specification within a workflow definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionSpec {
    /// The action kind.
    #[serde(rename = "type")]
    pub kind: ActionKind,
    /// Human-readable display name.
    pub name: Option<String>,
    /// Icon hint for a consuming UI.
    pub icon: Option<String>,
    /// Handler-specific configuration.
    pub config: ActionConfig,
}

impl ActionSpec {
    /// Creates an action of the given kind with empty configuration.
    #[must_use]
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the icon hint.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Adds a configuration entry.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }
}

/// The result of executing an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Whether the handler reported success.
    pub success: bool,
    /// Human-readable result description.
    pub message: String,
}

impl ActionOutcome {
    /// Creates a successful outcome.
    #[must_use]
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Creates a failed outcome.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// A side-effecting action handler.
///
/// Handlers may perform arbitrary external I/O; the registry only
/// requires this contract shape.
pub trait ActionHandler: Send + Sync {
    /// Executes the action with the given configuration.
    fn execute(&self, config: &ActionConfig) -> ActionOutcome;
}

/// Models the latency of action execution.
///
/// The registry blocks on a sample before each dispatch. Tests inject
/// [`NoLatency`] for deterministic, instant runs.
pub trait LatencyModel: Send + Sync {
    /// Returns the delay to apply before the next dispatch.
    fn sample(&self) -> Duration;
}

/// Uniformly random latency within a closed millisecond interval.
#[derive(Debug, Clone, Copy)]
pub struct UniformLatency {
    min_ms: u64,
    max_ms: u64,
}

impl UniformLatency {
    /// Creates a latency model over `[min_ms, max_ms]` milliseconds.
    #[must_use]
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }
}

impl Default for UniformLatency {
    fn default() -> Self {
        // The demo interval: real I/O takes time, so simulated actions do too.
        Self::from_millis(500, 1500)
    }
}

impl LatencyModel for UniformLatency {
    fn sample(&self) -> Duration {
        let ms = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        Duration::from_millis(ms)
    }
}

/// Zero latency, for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

impl LatencyModel for NoLatency {
    fn sample(&self) -> Duration {
        Duration::ZERO
    }
}

fn str_field<'a>(config: &'a ActionConfig, key: &str, default: &'a str) -> &'a str {
    config.get(key).and_then(JsonValue::as_str).unwrap_or(default)
}

/// Simulates sending an email.
#[derive(Debug, Clone, Copy, Default)]
pub struct SendEmailAction;

impl ActionHandler for SendEmailAction {
    fn execute(&self, config: &ActionConfig) -> ActionOutcome {
        let to = str_field(config, "to", "user@example.com");
        info!(recipient = %to, "sending email");
        ActionOutcome::succeeded("Email sent successfully")
    }
}

/// Simulates posting a Slack message.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlackMessageAction;

impl ActionHandler for SlackMessageAction {
    fn execute(&self, config: &ActionConfig) -> ActionOutcome {
        let channel = str_field(config, "channel", "#general");
        info!(%channel, "sending Slack message");
        ActionOutcome::succeeded("Slack message sent")
    }
}

/// Simulates creating a task.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateTaskAction;

impl ActionHandler for CreateTaskAction {
    fn execute(&self, config: &ActionConfig) -> ActionOutcome {
        let title = str_field(config, "title", "New Task");
        info!(%title, "creating task");
        ActionOutcome::succeeded("Task created")
    }
}

/// Simulates issuing an HTTP request.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpRequestAction;

impl ActionHandler for HttpRequestAction {
    fn execute(&self, config: &ActionConfig) -> ActionOutcome {
        let url = str_field(config, "url", "https://httpbin.org/post");
        let method = str_field(config, "method", "POST");
        info!(%method, %url, "making HTTP request");
        ActionOutcome::succeeded(format!("{method} request completed"))
    }
}

/// Logs the configured data. Also serves as the dispatch fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDataAction;

impl ActionHandler for LogDataAction {
    fn execute(&self, config: &ActionConfig) -> ActionOutcome {
        info!(data = %JsonValue::Object(config.clone()), "logging data");
        ActionOutcome::succeeded("Data logged")
    }
}

/// Maps action kind names to handlers.
///
/// Dispatch resolves the kind name against the registered handlers and
/// falls back to the log-data handler for anything unregistered. New
/// handlers extend the registry without touching dispatch logic.
pub struct ActionRegistry {
    handlers: HashMap<String, Box<dyn ActionHandler>>,
    fallback: Box<dyn ActionHandler>,
    latency: Box<dyn LatencyModel>,
}

impl ActionRegistry {
    /// Creates a registry with the five built-in handlers and the default
    /// latency model.
    #[must_use]
    pub fn new() -> Self {
        Self::with_latency(Box::new(UniformLatency::default()))
    }

    /// Creates a registry with the built-in handlers and the given
    /// latency model.
    #[must_use]
    pub fn with_latency(latency: Box<dyn LatencyModel>) -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
            fallback: Box::new(LogDataAction),
            latency,
        };
        registry.register(ActionKind::SendEmail.name(), Box::new(SendEmailAction));
        registry.register(ActionKind::SlackMessage.name(), Box::new(SlackMessageAction));
        registry.register(ActionKind::CreateTask.name(), Box::new(CreateTaskAction));
        registry.register(ActionKind::HttpRequest.name(), Box::new(HttpRequestAction));
        registry.register(ActionKind::LogData.name(), Box::new(LogDataAction));
        registry
    }

    /// Registers a handler under a kind name, replacing any previous
    /// handler for that name.
    pub fn register(&mut self, kind: impl Into<String>, handler: Box<dyn ActionHandler>) {
        self.handlers.insert(kind.into(), handler);
    }

    /// Dispatches an action specification.
    pub fn dispatch(&self, spec: &ActionSpec) -> ActionOutcome {
        self.dispatch_named(spec.kind.name(), &spec.config)
    }

    /// Dispatches by kind name, for handlers registered outside the
    /// built-in kinds.
    pub fn dispatch_named(&self, kind: &str, config: &ActionConfig) -> ActionOutcome {
        std::thread::sleep(self.latency.sample());
        let handler = self.handlers.get(kind).unwrap_or(&self.fallback);
        handler.execute(config)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
