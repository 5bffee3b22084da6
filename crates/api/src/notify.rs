// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Out-of-band user notification capability.
//!
//! Deep call sites sometimes need to surface an error to whatever UI is
//! currently mounted. That capability is an explicitly injected trait
//! object, never a process-wide global, so the core stays testable
//! without any UI bootstrap.

use tracing::{error, info, warn};

/// How loudly a notification should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational; no action needed.
    Info,
    /// Something degraded but the operation continued.
    Warning,
    /// An operation failed and the user should know.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// The "notify the user out-of-band" capability.
pub trait Notifier: Send + Sync {
    /// Surfaces a message to the user at the given severity.
    fn notify(&self, severity: Severity, message: &str);
}

/// A notifier that forwards to the tracing pipeline.
///
/// The default for the server process, where "the UI" is whoever is
/// tailing the logs.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => info!(target: "notify", "{message}"),
            Severity::Warning => warn!(target: "notify", "{message}"),
            Severity::Error => error!(target: "notify", "{message}"),
        }
    }
}

/// A notifier that discards everything.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _severity: Severity, _message: &str) {}
}
