//! Structured error types shared across the exchange crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`SantaError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (participant names, counts, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the exchange engine.
///
/// Only input validation and retry exhaustion are errors. A single attempt
/// running into a dead end is reported as a value by the engine, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum SantaError {
    /// Participant list and gift count validation errors.
    #[error("roster error: {0}")]
    Roster(ErrorInfo),
    /// Forbidden pair relation errors.
    #[error("constraint error: {0}")]
    Constraint(ErrorInfo),
    /// Assignment generation and verification errors.
    #[error("assignment error: {0}")]
    Assignment(ErrorInfo),
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and file access errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl SantaError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            SantaError::Roster(info)
            | SantaError::Constraint(info)
            | SantaError::Assignment(info)
            | SantaError::Config(info)
            | SantaError::Serde(info) => info,
        }
    }

    /// Returns the stable error code.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Adds a context entry to the payload, keeping the family.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let info = match &mut self {
            SantaError::Roster(info)
            | SantaError::Constraint(info)
            | SantaError::Assignment(info)
            | SantaError::Config(info)
            | SantaError::Serde(info) => info,
        };
        info.context.insert(key.into(), value.into());
        self
    }

    /// The roster cannot support `gifts` distinct givees per giver.
    pub fn insufficient_participants(participants: usize, gifts: usize) -> Self {
        SantaError::Roster(
            ErrorInfo::new(
                "insufficient-participants",
                format!(
                    "At least {} people must be participating to exchange {} gifts",
                    gifts.saturating_add(1),
                    gifts
                ),
            )
            .with_context("participants", participants.to_string())
            .with_context("gifts", gifts.to_string()),
        )
    }

    /// The gift count must be positive.
    pub fn invalid_gift_count(gifts: usize) -> Self {
        SantaError::Roster(
            ErrorInfo::new("invalid-gift-count", "gift count must be at least one")
                .with_context("gifts", gifts.to_string()),
        )
    }

    /// Every retry was spent without producing an assignment.
    pub fn no_feasible_assignment(attempts: usize, participants: usize, gifts: usize) -> Self {
        SantaError::Assignment(
            ErrorInfo::new(
                "no-feasible-assignment",
                format!("no valid assignment found after {attempts} attempts"),
            )
            .with_context("attempts", attempts.to_string())
            .with_context("participants", participants.to_string())
            .with_context("gifts", gifts.to_string())
            .with_hint("the exclusions are likely unsatisfiable for this group; relax some of them"),
        )
    }

    /// Returns whether the error is the non-retryable roster size check.
    pub fn is_insufficient_participants(&self) -> bool {
        matches!(self, SantaError::Roster(info) if info.code == "insufficient-participants")
    }

    /// Returns whether the retry budget was exhausted.
    pub fn is_no_feasible_assignment(&self) -> bool {
        matches!(self, SantaError::Assignment(info) if info.code == "no-feasible-assignment")
    }
}
