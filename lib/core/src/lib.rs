//! Core domain types and utilities for the flowmate automation platform.
//!
//! This crate provides the foundational types, error handling, and shared
//! utilities used throughout the flowmate workflow automation engine.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ExecutionId, WorkflowId};
