//! Trigger types and evaluation.
//!
//! A trigger is the gating condition that determines whether a workflow
//! run starts. The built-in evaluator treats manual, scheduled, and event
//! triggers as always firing; real schedule and event-queue evaluation
//! belongs to the hosting scheduler, which replaces the evaluator behind
//! the [`TriggerEvaluator`] seam without touching any callers.

use serde::{Deserialize, Serialize};

/// The kind of trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// User-initiated trigger.
    Manual,
    /// Time-based trigger.
    Scheduled,
    /// External event trigger.
    Event,
    /// Catch-all for unrecognized trigger identifiers in submitted
    /// definitions. Always fails evaluation.
    #[serde(other)]
    Unknown,
}

impl TriggerKind {
    /// Returns the canonical identifier for this kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Scheduled => "scheduled",
            Self::Event => "event",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for TriggerKind {
    fn default() -> Self {
        Self::Manual
    }
}

/// Schedule cadence for scheduled triggers.
///
/// Display metadata only; the evaluator does not consult it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// Once per day.
    Daily,
    /// Once per hour.
    Hourly,
}

/// A trigger specification within a workflow definition.
///
/// The `name`, `icon`, and `schedule` fields are display metadata carried
/// for suggestion and UI purposes; evaluation looks only at `kind`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerSpec {
    /// The trigger kind.
    #[serde(rename = "type")]
    pub kind: TriggerKind,
    /// Human-readable display name.
    pub name: Option<String>,
    /// Icon hint for a consuming UI.
    pub icon: Option<String>,
    /// Schedule cadence, for scheduled triggers.
    pub schedule: Option<Schedule>,
}

impl TriggerSpec {
    /// Creates a manual trigger.
    #[must_use]
    pub fn manual() -> Self {
        Self {
            kind: TriggerKind::Manual,
            ..Self::default()
        }
    }

    /// Creates a scheduled trigger with the given cadence.
    #[must_use]
    pub fn scheduled(schedule: Schedule) -> Self {
        Self {
            kind: TriggerKind::Scheduled,
            schedule: Some(schedule),
            ..Self::default()
        }
    }

    /// Creates an event trigger.
    #[must_use]
    pub fn event() -> Self {
        Self {
            kind: TriggerKind::Event,
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
}

/// The result of evaluating a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerOutcome {
    /// Whether the trigger fired.
    pub passed: bool,
    /// Human-readable explanation.
    pub message: String,
}

impl TriggerOutcome {
    /// Creates a passing outcome.
    #[must_use]
    pub fn fired(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
        }
    }

    /// Creates a failing outcome.
    #[must_use]
    pub fn held(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }
}

/// Decides whether a trigger currently fires.
///
/// The evaluator is a total function from trigger spec to outcome; it
/// never fails. Hosting systems with real schedule or event-queue state
/// provide their own implementation.
pub trait TriggerEvaluator: Send + Sync {
    /// Evaluates the trigger.
    fn evaluate(&self, spec: &TriggerSpec) -> TriggerOutcome;
}

/// The built-in trigger policy: every recognized kind fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTriggerEvaluator;

impl TriggerEvaluator for DefaultTriggerEvaluator {
    fn evaluate(&self, spec: &TriggerSpec) -> TriggerOutcome {
        match spec.kind {
            TriggerKind::Manual => TriggerOutcome::fired("Manual trigger activated"),
            TriggerKind::Scheduled => TriggerOutcome::fired("Schedule time reached"),
            TriggerKind::Event => TriggerOutcome::fired("Event detected"),
            TriggerKind::Unknown => TriggerOutcome::held("Unknown trigger type"),
        }
    }
}
