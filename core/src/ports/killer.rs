//! Process signalling ports (interfaces).

use std::time::Duration;

use crate::domain::TerminationSignal;
use crate::error::Result;

/// Port for delivering termination signals.
///
/// Implementations handle platform-specific signal delivery.
pub trait ProcessSignaller: Send + Sync {
    /// Send a termination signal to a process.
    ///
    /// Returns [`crate::Error::Signal`] when the OS rejects the request.
    fn send(&self, pid: u32, signal: TerminationSignal) -> Result<()>;

    /// Probe whether a process still exists.
    fn is_alive(&self, pid: u32) -> bool;
}

/// Port for waiting out the grace period between SIGTERM and the liveness probe.
pub trait GraceTimer: Send + Sync {
    fn wait(&self, period: Duration) -> impl std::future::Future<Output = ()> + Send;
}
