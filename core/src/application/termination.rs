//! Port termination application service.

use tracing::{debug, info, warn};

use crate::domain::{
    Escalation, KillOutcome, ListeningPort, Termination, TerminationSignal, GRACE_PERIOD,
};
use crate::error::{Error, Result};
use crate::ports::{ConfirmationGate, GraceTimer, ProcessInspector, ProcessSignaller, SocketTable};

use super::PortEnumerator;

/// Application service that frees ports by terminating their owners.
///
/// Each request re-resolves the port with a fresh enumeration, so a pid
/// listed earlier is never signalled after it died or was replaced.
pub struct TerminationController<T, P, S, W>
where
    T: SocketTable,
    P: ProcessInspector,
    S: ProcessSignaller,
    W: GraceTimer,
{
    enumerator: PortEnumerator<T, P>,
    signaller: S,
    timer: W,
}

impl<T, P, S, W> TerminationController<T, P, S, W>
where
    T: SocketTable,
    P: ProcessInspector,
    S: ProcessSignaller,
    W: GraceTimer,
{
    pub fn new(enumerator: PortEnumerator<T, P>, signaller: S, timer: W) -> Self {
        Self {
            enumerator,
            signaller,
            timer,
        }
    }

    pub fn enumerator(&self) -> &PortEnumerator<T, P> {
        &self.enumerator
    }

    /// Terminate the process listening on `port`.
    ///
    /// Unless `force` is set, `gate` is asked once before any signal is sent.
    /// Forced kills send SIGKILL straight away; otherwise SIGTERM is sent,
    /// the grace period is waited out, and SIGKILL follows only if the
    /// process is still alive.
    pub async fn kill_port<G>(&self, port: u16, force: bool, gate: &mut G) -> KillOutcome
    where
        G: ConfirmationGate + ?Sized,
    {
        let target = match self.enumerator.find_port(port).await {
            Ok(Some(target)) => target,
            Ok(None) => {
                info!(port = port, "Port is not listening");
                return KillOutcome::NotListening { port };
            }
            Err(error) => {
                info!(port = port, error = %error, "Failed to resolve port");
                return KillOutcome::Failed { port, error };
            }
        };

        if !target.has_owner() {
            info!(port = port, "Listener has no identifiable owner");
            return KillOutcome::Failed {
                port,
                error: Error::NoOwner(port),
            };
        }

        if !force && !gate.confirm(&target) {
            info!(port = port, pid = target.owner_pid, "Kill cancelled");
            return KillOutcome::Cancelled { port };
        }

        match self.terminate(&target, force).await {
            Ok(escalation) => {
                info!(
                    port = port,
                    pid = target.owner_pid,
                    escalation = ?escalation,
                    "Process terminated"
                );
                KillOutcome::Terminated(Termination {
                    port,
                    pid: target.owner_pid,
                    process_name: target.process_name,
                    escalation,
                })
            }
            Err(error) => {
                info!(port = port, pid = target.owner_pid, error = %error, "Kill failed");
                KillOutcome::Failed { port, error }
            }
        }
    }

    /// Terminate several ports strictly in order.
    ///
    /// Each port runs to completion before the next one starts, and a
    /// failure on one port does not affect the others.
    pub async fn kill_ports<G>(&self, ports: &[u16], force: bool, gate: &mut G) -> Vec<KillOutcome>
    where
        G: ConfirmationGate + ?Sized,
    {
        let mut outcomes = Vec::with_capacity(ports.len());
        for &port in ports {
            outcomes.push(self.kill_port(port, force, gate).await);
        }
        outcomes
    }

    /// Drive the signal phase to a terminal [`Escalation`] state.
    async fn terminate(&self, target: &ListeningPort, force: bool) -> Result<Escalation> {
        let pid = target.owner_pid;

        if force {
            self.signaller.send(pid, TerminationSignal::Forceful)?;
            return Ok(Escalation::Forced);
        }

        // A rejected SIGTERM fails the kill without escalating.
        self.signaller.send(pid, TerminationSignal::Graceful)?;

        let mut state = Escalation::SentGraceful;
        while !state.is_complete() {
            state = match state {
                Escalation::SentGraceful => {
                    debug!(pid = pid, period = ?GRACE_PERIOD, "Waiting for graceful exit");
                    self.timer.wait(GRACE_PERIOD).await;
                    Escalation::Verifying
                }
                Escalation::Verifying => self.verify(pid),
                done => done,
            };
        }

        Ok(state)
    }

    /// Probe after the grace period and escalate once if needed.
    fn verify(&self, pid: u32) -> Escalation {
        if !self.signaller.is_alive(pid) {
            return Escalation::Exited;
        }

        debug!(pid = pid, "Process survived grace period, escalating");
        if let Err(e) = self.signaller.send(pid, TerminationSignal::Forceful) {
            warn!(pid = pid, error = %e, "Escalation signal failed");
        }
        Escalation::Escalated
    }
}
