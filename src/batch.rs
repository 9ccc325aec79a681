//! Cancellation and deadline control for batch operations.

use std::time::Instant;

use tokio_util::sync::CancellationToken;

/// Caller-side control over a bulk operation (import, export, workspace
/// migration). Checked between files; operations are synchronous, so a file
/// already being processed runs to completion.
#[derive(Debug, Clone, Default)]
pub struct BatchControl {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl BatchControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// A control that aborts once `deadline` has passed.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancel: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// Token the caller keeps to request cancellation from another thread.
    pub fn cancel_handle(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Per-file outcome of a batch operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub name: String,
    pub success: bool,
}

impl FileOutcome {
    pub fn succeeded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: true,
        }
    }

    pub fn failed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: false,
        }
    }
}
