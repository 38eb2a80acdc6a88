//! Port enumeration application service.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::ListeningPort;
use crate::error::Result;
use crate::ports::{ProcessInspector, SocketTable};

use super::resolve_process;

/// Application service for listing listening ports.
///
/// Reads the socket table through [`SocketTable`] and attaches owner details
/// through [`ProcessInspector`], so both can be substituted in tests.
pub struct PortEnumerator<T: SocketTable, P: ProcessInspector> {
    table: T,
    inspector: P,
}

impl<T: SocketTable, P: ProcessInspector> PortEnumerator<T, P> {
    /// Create a new enumerator over the given adapters.
    pub fn new(table: T, inspector: P) -> Self {
        Self { table, inspector }
    }

    /// List every listening port, one entry per port number.
    ///
    /// The first listening socket seen for a port wins; later sockets on the
    /// same port are dropped even when another process owns them. Port 0 is
    /// skipped. Entries come back in socket table order.
    ///
    /// Fails only when the socket table itself cannot be read.
    pub async fn list_listening_ports(&self) -> Result<Vec<ListeningPort>> {
        let sockets = self.table.sockets().await?;
        let total = sockets.len();

        let mut seen = HashSet::new();
        let mut ports = Vec::new();

        for socket in sockets {
            if !socket.is_listening() || socket.local_port == 0 {
                continue;
            }
            if !seen.insert(socket.local_port) {
                continue;
            }

            let details = resolve_process(&self.inspector, socket.pid).await;
            ports.push(ListeningPort::from_raw(&socket, details));
        }

        debug!(sockets = total, ports = ports.len(), "Enumerated listening ports");
        Ok(ports)
    }

    /// Look up a single port with a fresh enumeration.
    pub async fn find_port(&self, port: u16) -> Result<Option<ListeningPort>> {
        Ok(self
            .list_listening_ports()
            .await?
            .into_iter()
            .find(|p| p.port == port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Protocol, RawSocket, IPPROTO_TCP, IPPROTO_UDP, UNKNOWN_PROCESS};
    use crate::error::Error;

    /// Mock socket table for testing.
    struct MockTable {
        sockets: Vec<RawSocket>,
    }

    impl SocketTable for MockTable {
        async fn sockets(&self) -> Result<Vec<RawSocket>> {
            Ok(self.sockets.clone())
        }
    }

    struct FailingTable;

    impl SocketTable for FailingTable {
        async fn sockets(&self) -> Result<Vec<RawSocket>> {
            Err(Error::Query("permission denied".to_string()))
        }
    }

    /// Resolves pid 1234 only; everything else is unknown.
    struct MockInspector;

    impl ProcessInspector for MockInspector {
        async fn name(&self, pid: u32) -> Option<String> {
            (pid == 1234).then(|| "node".to_string())
        }

        async fn resident_memory(&self, pid: u32) -> Option<u64> {
            (pid == 1234).then_some(1024 * 1024)
        }
    }

    fn enumerator(sockets: Vec<RawSocket>) -> PortEnumerator<MockTable, MockInspector> {
        PortEnumerator::new(MockTable { sockets }, MockInspector)
    }

    #[tokio::test]
    async fn test_filters_and_resolves() {
        let service = enumerator(vec![
            RawSocket::new(3000, "*", IPPROTO_TCP, "LISTEN", 1234),
            RawSocket::new(443, "10.0.0.2", IPPROTO_TCP, "ESTAB", 1234),
            RawSocket::new(5353, "0.0.0.0", IPPROTO_UDP, "UNCONN", 700),
        ]);

        let ports = service.list_listening_ports().await.unwrap();
        assert_eq!(ports.len(), 2);

        assert_eq!(ports[0].port, 3000);
        assert_eq!(ports[0].process_name, "node");
        assert_eq!(ports[0].resident_memory_bytes, 1024 * 1024);

        // Unresolvable owners are kept with degraded metadata.
        assert_eq!(ports[1].port, 5353);
        assert_eq!(ports[1].protocol, Protocol::Udp);
        assert_eq!(ports[1].owner_pid, 700);
        assert_eq!(ports[1].process_name, UNKNOWN_PROCESS);
        assert_eq!(ports[1].resident_memory_bytes, 0);
    }

    #[tokio::test]
    async fn test_dedup_first_seen_wins() {
        let service = enumerator(vec![
            RawSocket::new(8080, "0.0.0.0", IPPROTO_TCP, "LISTEN", 1234),
            RawSocket::new(8080, "[::]", IPPROTO_TCP, "LISTEN", 1234),
            RawSocket::new(8080, "*", IPPROTO_UDP, "", 999),
            RawSocket::new(22, "*", IPPROTO_TCP, "LISTEN", 0),
        ]);

        let ports = service.list_listening_ports().await.unwrap();
        let numbers: Vec<u16> = ports.iter().map(|p| p.port).collect();
        assert_eq!(numbers, vec![8080, 22]);
        assert_eq!(ports[0].address, "0.0.0.0");
        assert_eq!(ports[0].protocol, Protocol::Tcp);
        assert!(!ports[1].has_owner());
    }

    #[tokio::test]
    async fn test_skips_port_zero() {
        let service = enumerator(vec![RawSocket::new(0, "*", IPPROTO_UDP, "", 1234)]);
        assert!(service.list_listening_ports().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_failure() {
        let service = PortEnumerator::new(FailingTable, MockInspector);
        let err = service.list_listening_ports().await.unwrap_err();
        assert!(matches!(err, Error::Query(_)));
    }

    #[tokio::test]
    async fn test_find_port() {
        let service = enumerator(vec![
            RawSocket::new(3000, "*", IPPROTO_TCP, "LISTEN", 1234),
            RawSocket::new(9999, "*", IPPROTO_TCP, "CLOSE_WAIT", 1234),
        ]);

        let found = service.find_port(3000).await.unwrap();
        assert_eq!(found.map(|p| p.process_name).as_deref(), Some("node"));

        assert!(service.find_port(9999).await.unwrap().is_none());
    }
}
