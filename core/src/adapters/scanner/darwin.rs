//! macOS socket table implementation using lsof.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::domain::{RawSocket, IPPROTO_TCP, IPPROTO_UDP};
use crate::error::{Error, Result};

use super::utils::Utils;
use super::Scanner;

/// macOS-specific socket table reader using lsof.
pub struct DarwinScanner {
    lsof_path: PathBuf,
}

impl DarwinScanner {
    pub fn new(lsof_path: impl Into<PathBuf>) -> Self {
        Self {
            lsof_path: lsof_path.into(),
        }
    }

    /// Parse lsof output into raw socket rows.
    ///
    /// TCP rows end with a `(STATE)` token; UDP rows carry no state. UDP rows
    /// with a remote peer (`local->remote`) are connected sockets and skipped.
    fn parse_lsof_output(&self, output: &str) -> Vec<RawSocket> {
        let mut sockets = Vec::new();

        for line in output.lines().skip(1) {
            let components: Vec<&str> = line.split_whitespace().collect();
            if components.len() < 9 {
                continue;
            }

            let pid: u32 = match components[1].parse() {
                Ok(p) => p,
                Err(_) => continue,
            };

            // NODE is normally column 7, but SIZE/OFF can be blank.
            let Some(node_idx) = components
                .iter()
                .skip(6)
                .position(|c| *c == "TCP" || *c == "UDP")
                .map(|i| i + 6)
            else {
                continue;
            };

            let protocol_number = if components[node_idx] == "UDP" {
                IPPROTO_UDP
            } else {
                IPPROTO_TCP
            };

            let Some(name) = components.get(node_idx + 1) else {
                continue;
            };
            if name.contains("->") {
                continue;
            }

            let Some((address, port)) = Utils::parse_address(name) else {
                continue;
            };

            let state = components
                .get(node_idx + 2)
                .map(|s| s.trim_start_matches('(').trim_end_matches(')'))
                .unwrap_or("");

            sockets.push(RawSocket::new(port, address, protocol_number, state, pid));
        }

        sockets
    }
}

impl Scanner for DarwinScanner {
    /// Executes: `lsof -nP -iTCP -sTCP:LISTEN -iUDP`
    async fn scan(&self) -> Result<Vec<RawSocket>> {
        let output = Command::new(&self.lsof_path)
            .args(["-nP", "-iTCP", "-sTCP:LISTEN", "-iUDP"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                Error::Query(format!("Failed to run {}: {}", self.lsof_path.display(), e))
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);

        // lsof exits 1 when nothing matched.
        if !output.status.success() {
            if output.status.code() == Some(1) && stdout.trim().is_empty() {
                return Ok(Vec::new());
            }
            return Err(Error::Query(format!(
                "{} exited with {}: {}",
                self.lsof_path.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let sockets = self.parse_lsof_output(&stdout);
        debug!(count = sockets.len(), "Read socket table from lsof");
        Ok(sockets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lsof_output() {
        let scanner = DarwinScanner::new("lsof");

        let output = r#"COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
node     34805  code   19u  IPv6 0x3d8015e195af1f3f      0t0  TCP [::1]:3000 (LISTEN)
nginx        1  root    6u  IPv4 0x1234567890abcdef      0t0  TCP *:80 (LISTEN)
mDNSRespo  500 _mdns    8u  IPv4 0x1111111111111111      0t0  UDP *:5353
rapportd   612  code   10u  IPv4 0x2222222222222222      0t0  UDP 127.0.0.1:5000->10.0.0.1:53
"#;

        let sockets = scanner.parse_lsof_output(output);
        assert_eq!(sockets.len(), 3);

        assert_eq!(sockets[0].local_port, 3000);
        assert_eq!(sockets[0].address, "[::1]");
        assert_eq!(sockets[0].state, "LISTEN");
        assert_eq!(sockets[0].pid, 34805);

        assert_eq!(sockets[1].local_port, 80);
        assert_eq!(sockets[1].protocol_number, IPPROTO_TCP);

        assert_eq!(sockets[2].local_port, 5353);
        assert_eq!(sockets[2].protocol_number, IPPROTO_UDP);
        assert_eq!(sockets[2].state, "");
        assert!(sockets[2].is_listening());
    }
}
