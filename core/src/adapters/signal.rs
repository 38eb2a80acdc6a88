//! Signal delivery adapter.

use crate::domain::TerminationSignal;
use crate::error::{Error, Result};
use crate::ports::ProcessSignaller;

/// Delivers POSIX signals with `kill(2)`.
pub struct NixSignaller;

impl NixSignaller {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NixSignaller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
mod unix {
    use nix::errno::Errno;
    use nix::sys::signal::{self, Signal};
    use nix::unistd::Pid;
    use tracing::debug;

    use super::*;

    /// Convert to a positive pid. 0 and negative values address process
    /// groups and are never signalled.
    fn target(pid: u32) -> Option<Pid> {
        match i32::try_from(pid) {
            Ok(raw) if raw > 0 => Some(Pid::from_raw(raw)),
            _ => None,
        }
    }

    fn nix_signal(signal: TerminationSignal) -> Signal {
        match signal {
            TerminationSignal::Graceful => Signal::SIGTERM,
            TerminationSignal::Forceful => Signal::SIGKILL,
        }
    }

    impl ProcessSignaller for NixSignaller {
        fn send(&self, pid: u32, signal: TerminationSignal) -> Result<()> {
            let Some(target) = target(pid) else {
                return Err(Error::Signal {
                    pid,
                    signal: signal.name(),
                    reason: "refusing to signal a non-positive pid".to_string(),
                });
            };

            debug!(pid = pid, signal = signal.name(), "Sending signal");
            signal::kill(target, nix_signal(signal)).map_err(|errno: Errno| Error::Signal {
                pid,
                signal: signal.name(),
                reason: errno.desc().to_string(),
            })
        }

        fn is_alive(&self, pid: u32) -> bool {
            match target(pid) {
                // EPERM means the process exists but belongs to someone else.
                Some(target) => matches!(signal::kill(target, None), Ok(()) | Err(Errno::EPERM)),
                None => false,
            }
        }
    }

}

#[cfg(not(unix))]
impl ProcessSignaller for NixSignaller {
    fn send(&self, _pid: u32, _signal: TerminationSignal) -> Result<()> {
        Err(Error::UnsupportedPlatform(std::env::consts::OS.to_string()))
    }

    fn is_alive(&self, _pid: u32) -> bool {
        false
    }
}
