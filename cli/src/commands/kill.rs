//! Kill command - free ports by terminating their owners.

use std::io::{self, Write};

use anyhow::Result;
use sysport_core::ports::{GraceTimer, ProcessInspector, ProcessSignaller, SocketTable};
use sysport_core::{
    parse_port_args, ConfirmationGate, KillOutcome, SysportEngine, TerminationController,
};

use crate::display::{ports, Theme};
use crate::prompt::StdinConfirmation;

pub const USAGE_HINT: &str = "Use 'sysport ports kill --help' for usage examples";

/// Free the ports in `args`, asking on stdin unless `force` is set.
pub async fn run(engine: &SysportEngine, theme: &Theme, args: &[String], force: bool) -> Result<()> {
    let mut gate = StdinConfirmation::new(theme);
    kill_each(
        engine.controller(),
        theme,
        args,
        force,
        &mut gate,
        &mut io::stdout(),
        &mut io::stderr(),
    )
    .await
}

/// Validate every argument first; one bad argument aborts the whole batch
/// before the socket table is read. Valid ports are then handled in order
/// and each result is written as soon as it is known.
pub async fn kill_each<T, P, S, W, G>(
    controller: &TerminationController<T, P, S, W>,
    theme: &Theme,
    args: &[String],
    force: bool,
    gate: &mut G,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()>
where
    T: SocketTable,
    P: ProcessInspector,
    S: ProcessSignaller,
    W: GraceTimer,
    G: ConfirmationGate,
{
    let targets = match parse_port_args(args) {
        Ok(targets) => targets,
        Err(e) => {
            writeln!(err, "Error: {}", e)?;
            writeln!(err, "{}", USAGE_HINT)?;
            return Ok(());
        }
    };

    for port in targets {
        let outcome = controller.kill_port(port, force, gate).await;
        writeln!(out, "{}", render(theme, &outcome))?;
        out.flush()?;
    }

    Ok(())
}

pub fn render(theme: &Theme, outcome: &KillOutcome) -> String {
    match outcome {
        KillOutcome::Terminated(t) => ports::kill_success(theme, t.port, &t.process_name),
        KillOutcome::NotListening { port } => ports::port_not_listening(theme, *port),
        KillOutcome::Cancelled { .. } => ports::kill_cancelled(theme),
        KillOutcome::Failed { port, error } => ports::kill_error(theme, *port, error),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use sysport_core::domain::IPPROTO_TCP;
    use sysport_core::{
        Error, Escalation, ListeningPort, PortEnumerator, RawSocket, Termination,
        TerminationSignal,
    };

    /// In-memory OS: listeners by port, plus a record of what was asked of it.
    #[derive(Default)]
    struct Host {
        listeners: HashMap<u16, (u32, &'static str)>,
        fail_query: bool,
        queries: Mutex<usize>,
        signals: Mutex<Vec<(u32, TerminationSignal)>>,
    }

    struct Table(Arc<Host>);

    impl SocketTable for Table {
        async fn sockets(&self) -> sysport_core::Result<Vec<RawSocket>> {
            *self.0.queries.lock().unwrap() += 1;
            if self.0.fail_query {
                return Err(Error::Query("netlink refused".to_string()));
            }
            Ok(self
                .0
                .listeners
                .iter()
                .map(|(&port, &(pid, _))| RawSocket::new(port, "*", IPPROTO_TCP, "LISTEN", pid))
                .collect())
        }
    }

    struct Inspector(Arc<Host>);

    impl ProcessInspector for Inspector {
        async fn name(&self, pid: u32) -> Option<String> {
            self.0
                .listeners
                .values()
                .find(|(owner, _)| *owner == pid)
                .map(|(_, name)| name.to_string())
        }

        async fn resident_memory(&self, _pid: u32) -> Option<u64> {
            None
        }
    }

    struct Signaller(Arc<Host>);

    impl ProcessSignaller for Signaller {
        fn send(&self, pid: u32, signal: TerminationSignal) -> sysport_core::Result<()> {
            self.0.signals.lock().unwrap().push((pid, signal));
            Ok(())
        }

        fn is_alive(&self, _pid: u32) -> bool {
            false
        }
    }

    struct Timer;

    impl GraceTimer for Timer {
        async fn wait(&self, _period: Duration) {}
    }

    fn controller(host: &Arc<Host>) -> TerminationController<Table, Inspector, Signaller, Timer> {
        TerminationController::new(
            PortEnumerator::new(Table(host.clone()), Inspector(host.clone())),
            Signaller(host.clone()),
            Timer,
        )
    }

    /// Log sink shared between the subscriber and the assertions.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn args(ports: &[&str]) -> Vec<String> {
        ports.iter().map(|p| p.to_string()).collect()
    }

    #[tokio::test]
    async fn test_invalid_batch_touches_nothing() {
        let mut host = Host::default();
        host.listeners.insert(3000, (1234, "node"));
        let host = Arc::new(host);

        let (mut out, mut err) = (Vec::new(), Vec::new());
        let mut gate = |_: &ListeningPort| true;
        kill_each(
            &controller(&host),
            &Theme::plain(),
            &args(&["3000", "99999"]),
            true,
            &mut gate,
            &mut out,
            &mut err,
        )
        .await
        .unwrap();

        assert_eq!(*host.queries.lock().unwrap(), 0);
        assert!(host.signals.lock().unwrap().is_empty());
        assert!(out.is_empty());
        assert_eq!(
            String::from_utf8(err).unwrap(),
            format!("Error: Port 99999 out of range (must be 1-65535)\n{}\n", USAGE_HINT)
        );
    }

    #[tokio::test]
    async fn test_valid_batch_reports_each_port() {
        let mut host = Host::default();
        host.listeners.insert(3000, (1234, "node"));
        let host = Arc::new(host);

        let (mut out, mut err) = (Vec::new(), Vec::new());
        let mut asked = Vec::new();
        let mut gate = |target: &ListeningPort| {
            asked.push(target.port);
            true
        };
        kill_each(
            &controller(&host),
            &Theme::plain(),
            &args(&["3000", "8080"]),
            false,
            &mut gate,
            &mut out,
            &mut err,
        )
        .await
        .unwrap();

        assert_eq!(asked, vec![3000]);
        assert_eq!(*host.queries.lock().unwrap(), 2);
        assert_eq!(
            *host.signals.lock().unwrap(),
            vec![(1234, TerminationSignal::Graceful)]
        );
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "✓ Port 3000 (node) killed successfully\n✗ Port 8080 is not listening\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn test_render_outcomes() {
        let theme = Theme::plain();

        let done = KillOutcome::Terminated(Termination {
            port: 3000,
            pid: 1234,
            process_name: "node".to_string(),
            escalation: Escalation::Escalated,
        });
        assert_eq!(render(&theme, &done), "✓ Port 3000 (node) killed successfully");

        assert_eq!(
            render(&theme, &KillOutcome::NotListening { port: 3000 }),
            "✗ Port 3000 is not listening"
        );
        assert_eq!(render(&theme, &KillOutcome::Cancelled { port: 3000 }), "Kill cancelled");

        let failed = KillOutcome::Failed {
            port: 80,
            error: Error::Signal {
                pid: 1,
                signal: "SIGTERM",
                reason: "Operation not permitted".to_string(),
            },
        };
        assert_eq!(
            render(&theme, &failed),
            "✗ Failed to kill port 80: failed to send SIGTERM to process 1: Operation not permitted"
        );
    }

    #[tokio::test]
    async fn test_failures_stay_below_default_log_level() {
        let logs = LogBuffer::default();
        let sink = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("warn"))
            .with_writer(move || sink.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut unowned = Host::default();
        unowned.listeners.insert(3000, (0, "unknown"));
        let unowned = Arc::new(unowned);
        let refused = Arc::new(Host {
            fail_query: true,
            ..Host::default()
        });

        let mut out = Vec::new();
        let mut gate = |_: &ListeningPort| true;
        for host in [&unowned, &refused] {
            kill_each(
                &controller(host),
                &Theme::plain(),
                &args(&["3000"]),
                true,
                &mut gate,
                &mut out,
                &mut io::sink(),
            )
            .await
            .unwrap();
        }

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.starts_with("✗ Failed to kill port 3000: ")));
        assert!(logs.0.lock().unwrap().is_empty());
        assert!(unowned.signals.lock().unwrap().is_empty());
    }
}
