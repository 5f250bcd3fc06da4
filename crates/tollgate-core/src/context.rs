//! Per-run context types.
//!
//! The [`RunContext`] is handed to every step of both chains. It carries the
//! [`RunId`] used for log correlation and collects the [`Diagnostic`]s the
//! steps emit, in emission order.

use crate::Diagnostic;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// A unique identifier for each run, using UUID v7.
///
/// # Example
///
/// ```
/// use tollgate_core::RunId;
///
/// let id = RunId::new();
/// println!("Run ID: {}", id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    /// Creates a new unique run ID using UUID v7.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `RunId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RunId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Context that flows through both chains during one run.
///
/// # Example
///
/// ```
/// use tollgate_core::{Diagnostic, RunContext};
///
/// let mut ctx = RunContext::new();
/// ctx.emit(Diagnostic::check("age", true));
///
/// assert_eq!(ctx.diagnostics().len(), 1);
/// ```
#[derive(Debug)]
pub struct RunContext {
    /// Unique identifier for this run.
    run_id: RunId,

    /// When the run started.
    started_at: Instant,

    /// Events emitted so far, oldest first.
    diagnostics: Vec<Diagnostic>,
}

impl RunContext {
    /// Creates a new context with a fresh run ID.
    #[must_use]
    pub fn new() -> Self {
        Self::with_run_id(RunId::new())
    }

    /// Creates a context with a specific run ID.
    #[must_use]
    pub fn with_run_id(run_id: RunId) -> Self {
        Self {
            run_id,
            started_at: Instant::now(),
            diagnostics: Vec::new(),
        }
    }

    /// Returns the run ID.
    #[must_use]
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Records a diagnostic.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(run_id = %self.run_id, diagnostic = %diagnostic, "Diagnostic emitted");
        self.diagnostics.push(diagnostic);
    }

    /// Returns the diagnostics emitted so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the context, returning its diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Returns the time elapsed since the run started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_unique() {
        let id1 = RunId::new();
        let id2 = RunId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_run_id_display() {
        let uuid = Uuid::nil();
        let id = RunId::from_uuid(uuid);
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn test_run_id_serde_transparent() {
        let id = RunId::from(Uuid::nil());
        let json = serde_json::to_string(&id).expect("should serialize");
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }

    #[test]
    fn test_context_keeps_emission_order() {
        let mut ctx = RunContext::new();
        ctx.emit(Diagnostic::check("age", true));
        ctx.emit(Diagnostic::check("country", false));
        ctx.emit(Diagnostic::Rejected);

        assert_eq!(
            ctx.into_diagnostics(),
            vec![
                Diagnostic::CheckPassed { check: "age" },
                Diagnostic::CheckFailed { check: "country" },
                Diagnostic::Rejected,
            ]
        );
    }

    #[test]
    fn test_context_with_run_id() {
        let run_id = RunId::new();
        let ctx = RunContext::with_run_id(run_id);
        assert_eq!(ctx.run_id(), run_id);
        assert!(ctx.diagnostics().is_empty());
    }
}
