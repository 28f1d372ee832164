//! User-confirmation seam for mutating operations.
//!
//! Every stock movement asks for confirmation before dispatch. The policy
//! is injected so the UI can pop its own dialog and tests can script
//! approve/deny answers.

/// Describes the operation awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmAction {
    /// Short question, e.g. "Assign article to storage?".
    pub title: &'static str,

    /// Specifics of this invocation, e.g. quantities involved.
    pub detail: String,
}

pub trait ConfirmPolicy: Send + Sync {
    fn confirm(&self, action: &ConfirmAction) -> bool;
}

/// Policy that approves everything; for headless use and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl ConfirmPolicy for AlwaysConfirm {
    fn confirm(&self, _action: &ConfirmAction) -> bool {
        true
    }
}
