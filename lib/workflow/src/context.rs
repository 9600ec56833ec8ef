//! Runtime context for condition evaluation.
//!
//! Conditions compare against named values supplied by a
//! [`ContextProvider`]. The provider is the seam through which a host
//! connects the engine to real external state (APIs, databases, sensors);
//! the built-in [`SimulatedContext`] serves demo and test use.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value resolved from the execution context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    /// A textual value.
    Text(String),
    /// An integral value.
    Integer(i64),
}

impl ContextValue {
    /// Returns the value as a number, if it is numeric or parses as one.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// Supplies named runtime values to condition evaluation.
///
/// Unrecognized keys resolve to the text value `"unknown"` rather than
/// failing, so a condition over a missing key compares against that
/// sentinel.
pub trait ContextProvider: Send + Sync {
    /// Resolves a context key to its current value.
    fn get(&self, key: &str) -> ContextValue;
}

/// A fixed, simulated context for demo and test use.
///
/// Supplies `status`, `count`, `temperature`, and `day` (the current
/// weekday name).
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedContext;

impl ContextProvider for SimulatedContext {
    fn get(&self, key: &str) -> ContextValue {
        match key {
            "status" => ContextValue::from("active"),
            "count" => ContextValue::from(42),
            "temperature" => ContextValue::from(72),
            "day" => ContextValue::Text(Utc::now().format("%A").to_string()),
            _ => ContextValue::from("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_context_known_keys() {
        let ctx = SimulatedContext;
        assert_eq!(ctx.get("status"), ContextValue::from("active"));
        assert_eq!(ctx.get("count"), ContextValue::from(42));
        assert_eq!(ctx.get("temperature"), ContextValue::from(72));
    }

    #[test]
    fn simulated_context_day_is_weekday_name() {
        let day = SimulatedContext.get("day").to_string();
        let weekdays = [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ];
        assert!(weekdays.contains(&day.as_str()), "unexpected day: {day}");
    }

    #[test]
    fn unrecognized_key_falls_back_to_unknown() {
        assert_eq!(
            SimulatedContext.get("no_such_key"),
            ContextValue::from("unknown")
        );
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(ContextValue::from(42).as_number(), Some(42.0));
        assert_eq!(ContextValue::from("3.5").as_number(), Some(3.5));
        assert_eq!(ContextValue::from("active").as_number(), None);
    }

    #[test]
    fn display_rendering() {
        assert_eq!(ContextValue::from("active").to_string(), "active");
        assert_eq!(ContextValue::from(72).to_string(), "72");
    }
}
