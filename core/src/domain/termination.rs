//! Termination domain models: signals, escalation states, and per-port outcomes.

use std::time::Duration;

use crate::error::{Error, ErrorKind};

/// Fixed window between the graceful signal and the liveness probe.
pub const GRACE_PERIOD: Duration = Duration::from_secs(1);

/// Signal used to terminate a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationSignal {
    /// Recoverable request to exit (SIGTERM).
    Graceful,
    /// Unconditional removal (SIGKILL).
    Forceful,
}

impl TerminationSignal {
    pub fn name(&self) -> &'static str {
        match self {
            TerminationSignal::Graceful => "SIGTERM",
            TerminationSignal::Forceful => "SIGKILL",
        }
    }
}

impl std::fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Progress of the signal phase for one process.
///
/// Non-forced kills move `SentGraceful -> Verifying -> Exited | Escalated`.
/// Forced kills go straight to `Forced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    SentGraceful,
    Verifying,
    /// The process was gone when probed after the grace period.
    Exited,
    /// The process survived the grace period and was sent SIGKILL.
    Escalated,
    /// SIGKILL was sent immediately.
    Forced,
}

impl Escalation {
    /// Whether the signal phase has reached a terminal state.
    pub fn is_complete(&self) -> bool {
        matches!(
            self,
            Escalation::Exited | Escalation::Escalated | Escalation::Forced
        )
    }
}

/// A successful termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Termination {
    pub port: u16,
    pub pid: u32,
    pub process_name: String,
    /// Terminal state of the signal phase.
    pub escalation: Escalation,
}

/// Result of a kill request for one port.
#[derive(Debug)]
pub enum KillOutcome {
    Terminated(Termination),
    /// No active listener on the port; nothing was signalled.
    NotListening { port: u16 },
    /// The confirmation gate declined; nothing was signalled.
    Cancelled { port: u16 },
    /// Resolution, owner lookup, or signalling failed.
    Failed { port: u16, error: Error },
}

impl KillOutcome {
    /// The port this outcome refers to.
    pub fn port(&self) -> u16 {
        match self {
            KillOutcome::Terminated(t) => t.port,
            KillOutcome::NotListening { port }
            | KillOutcome::Cancelled { port }
            | KillOutcome::Failed { port, .. } => *port,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, KillOutcome::Terminated(_))
    }

    /// Error kind for outcomes that count as failures.
    ///
    /// `NotListening` reports [`ErrorKind::NotListening`]; `Cancelled` is a
    /// no-op and reports `None`.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            KillOutcome::Terminated(_) | KillOutcome::Cancelled { .. } => None,
            KillOutcome::NotListening { .. } => Some(ErrorKind::NotListening),
            KillOutcome::Failed { error, .. } => Some(error.kind()),
        }
    }
}
