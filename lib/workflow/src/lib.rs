//! Workflow engine for the flowmate automation platform.
//!
//! This crate provides the core workflow execution pipeline:
//!
//! - **Definitions**: Declarative workflows (trigger + optional condition + action)
//! - **Triggers**: Gating evaluation that decides whether a run starts
//! - **Conditions**: Comparison predicates over named context values
//! - **Actions**: A pluggable registry of side-effecting handlers
//! - **Execution**: Structured, append-only run records and history
//!
//! A workflow runs through three stages with short-circuit semantics:
//! the trigger gates the run, the optional condition gates the action,
//! and the action produces the run's final success or failure.

pub mod action;
pub mod condition;
pub mod context;
pub mod definition;
pub mod engine;
pub mod error;
pub mod execution;
pub mod trigger;

pub use action::{
    ActionConfig, ActionHandler, ActionKind, ActionOutcome, ActionRegistry, ActionSpec,
    LatencyModel, NoLatency, UniformLatency,
};
pub use condition::{evaluate_condition, ConditionOperator, ConditionOutcome, ConditionSpec};
pub use context::{ContextProvider, ContextValue, SimulatedContext};
pub use definition::{Workflow, WorkflowDraft, WorkflowStatus, WorkflowSummary};
pub use engine::{EngineStats, WorkflowEngine};
pub use error::{ConditionError, EngineError};
pub use execution::{ExecutionRecord, ExecutionStatus, StepRecord};
pub use trigger::{
    DefaultTriggerEvaluator, Schedule, TriggerEvaluator, TriggerKind, TriggerOutcome, TriggerSpec,
};
