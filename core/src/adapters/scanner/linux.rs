//! Linux socket table implementation using ss.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::OnceLock;

use regex::Regex;
use tokio::process::Command;
use tracing::debug;

use crate::domain::{RawSocket, IPPROTO_TCP, IPPROTO_UDP};
use crate::error::{Error, Result};

use super::utils::Utils;
use super::Scanner;

/// Linux-specific socket table reader.
pub struct LinuxScanner {
    ss_path: PathBuf,
}

fn pid_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"pid=(\d+)").expect("pid pattern is a valid regex"))
}

impl LinuxScanner {
    pub fn new(ss_path: impl Into<PathBuf>) -> Self {
        Self {
            ss_path: ss_path.into(),
        }
    }

    /// Parse ss output into raw socket rows.
    ///
    /// Expected ss output format (no header):
    /// ```text
    /// tcp   LISTEN 0      4096   127.0.0.53%lo:53   0.0.0.0:*   users:(("systemd-resolve",pid=651,fd=14))
    /// udp   UNCONN 0      0            0.0.0.0:5353 0.0.0.0:*   users:(("avahi-daemon",pid=700,fd=12))
    /// tcp   LISTEN 0      128          0.0.0.0:22   0.0.0.0:*
    /// ```
    ///
    /// The process column is missing when the caller may not inspect the
    /// owner; such rows get pid 0. When several processes share a socket the
    /// first one listed is taken.
    fn parse_ss_output(&self, output: &str) -> Vec<RawSocket> {
        let mut sockets = Vec::new();

        for line in output.lines() {
            // Columns: [Netid] [State] [Recv-Q] [Send-Q] [Local Address:Port] [Peer Address:Port] [Process]
            let components: Vec<&str> = line.split_whitespace().collect();
            if components.len() < 6 {
                continue;
            }

            let protocol_number = match components[0] {
                "tcp" => IPPROTO_TCP,
                "udp" => IPPROTO_UDP,
                _ => continue,
            };

            let Some((address, port)) = Utils::parse_address(components[4]) else {
                continue;
            };

            let pid = if components.len() > 6 {
                let process = components[6..].join(" ");
                pid_pattern()
                    .captures(&process)
                    .and_then(|caps| caps[1].parse().ok())
                    .unwrap_or(0)
            } else {
                0
            };

            sockets.push(RawSocket::new(
                port,
                address,
                protocol_number,
                components[1],
                pid,
            ));
        }

        sockets
    }
}

impl Scanner for LinuxScanner {
    /// Read all listening TCP and UDP sockets.
    ///
    /// Executes: `ss -H -t -u -l -n -p`
    ///
    /// Flags explained:
    /// -H, --no-header     Suppress header line
    /// -t, --tcp           display TCP sockets
    /// -u, --udp           display UDP sockets
    /// -l, --listening     display listening (and unconnected datagram) sockets
    /// -n, --numeric       don't resolve service names
    /// -p, --processes     show process using socket
    async fn scan(&self) -> Result<Vec<RawSocket>> {
        let output = Command::new(&self.ss_path)
            .args(["-H", "-t", "-u", "-l", "-n", "-p"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::Query(format!("Failed to run {}: {}", self.ss_path.display(), e)))?;

        if !output.status.success() {
            return Err(Error::Query(format!(
                "{} exited with {}: {}",
                self.ss_path.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let sockets = self.parse_ss_output(&stdout);
        debug!(count = sockets.len(), "Read socket table from ss");
        Ok(sockets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> LinuxScanner {
        LinuxScanner::new("ss")
    }

    #[test]
    fn test_parse_ss_output() {
        let output = r#"tcp   LISTEN 0      4096   127.0.0.53%lo:53        0.0.0.0:*    users:(("systemd-resolve",pid=651,fd=14))
udp   UNCONN 0      0            0.0.0.0:5353      0.0.0.0:*    users:(("avahi-daemon",pid=700,fd=12))
tcp   LISTEN 0      50     [::ffff:127.0.0.1]:3000       *:*    users:(("node",pid=53561,fd=187))"#;

        let sockets = scanner().parse_ss_output(output);
        assert_eq!(sockets.len(), 3);

        assert_eq!(sockets[0].local_port, 53);
        assert_eq!(sockets[0].address, "127.0.0.53");
        assert_eq!(sockets[0].protocol_number, IPPROTO_TCP);
        assert_eq!(sockets[0].state, "LISTEN");
        assert_eq!(sockets[0].pid, 651);

        assert_eq!(sockets[1].local_port, 5353);
        assert_eq!(sockets[1].protocol_number, IPPROTO_UDP);
        assert_eq!(sockets[1].state, "UNCONN");
        assert_eq!(sockets[1].pid, 700);

        assert_eq!(sockets[2].local_port, 3000);
        assert_eq!(sockets[2].pid, 53561);
    }

    #[test]
    fn test_missing_process_column() {
        let output = "tcp   LISTEN 0      128          0.0.0.0:22        0.0.0.0:*\n";
        let sockets = scanner().parse_ss_output(output);
        assert_eq!(sockets.len(), 1);
        assert_eq!(sockets[0].local_port, 22);
        assert_eq!(sockets[0].pid, 0);
    }

    #[test]
    fn test_shared_socket_takes_first_pid() {
        let output = r#"tcp LISTEN 0 511 0.0.0.0:80 0.0.0.0:* users:(("nginx",pid=1202,fd=6),("nginx",pid=1201,fd=6))"#;
        let sockets = scanner().parse_ss_output(output);
        assert_eq!(sockets[0].pid, 1202);
    }

    #[test]
    fn test_process_name_with_spaces() {
        let output = r#"tcp LISTEN 0 511 0.0.0.0:9000 0.0.0.0:* users:(("Web Content",pid=4242,fd=3))"#;
        let sockets = scanner().parse_ss_output(output);
        assert_eq!(sockets[0].pid, 4242);
    }

    #[test]
    fn test_dual_stack_rows_are_reported_raw() {
        // Deduplication is the enumerator's job; the adapter keeps every row.
        let output = r#"tcp LISTEN 0 4096 0.0.0.0:8080 0.0.0.0:* users:(("app",pid=10,fd=3))
tcp LISTEN 0 4096 [::]:8080 [::]:* users:(("app",pid=10,fd=4))"#;
        let sockets = scanner().parse_ss_output(output);
        assert_eq!(sockets.len(), 2);
        assert_eq!(sockets[1].address, "[::]");
    }

    #[test]
    fn test_link_local_scoped_rows() {
        let output = r#"tcp   LISTEN 0      128    [fe80::fc:ff:fe00:1]%eth0:54602      [::]:*    users:(("python3",pid=10638,fd=4))
udp   UNCONN 0      0      [fe80::fc:ff:fe00:1]%eth0:54603      [::]:*    users:(("python3",pid=10638,fd=5))"#;
        let sockets = scanner().parse_ss_output(output);
        assert_eq!(sockets.len(), 2);

        assert_eq!(sockets[0].local_port, 54602);
        assert_eq!(sockets[0].address, "[fe80::fc:ff:fe00:1]");
        assert_eq!(sockets[0].pid, 10638);
        assert!(sockets[0].is_listening());

        assert_eq!(sockets[1].local_port, 54603);
        assert_eq!(sockets[1].protocol_number, IPPROTO_UDP);
        assert!(sockets[1].is_listening());
    }

    #[test]
    fn test_skips_unparseable_lines() {
        let output = "\nnetlink UNCONN 0 0 rtnl:kernel *\ntcp LISTEN 0 4096 garbage 0.0.0.0:*\n";
        assert!(scanner().parse_ss_output(output).is_empty());
    }
}
