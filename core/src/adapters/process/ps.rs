//! Process inspector using ps.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::ports::ProcessInspector;

/// Runs `ps -o <field>= -p PID` once per field, so a failed name lookup
/// does not prevent the memory lookup.
pub struct PsInspector {
    ps_path: PathBuf,
}

impl PsInspector {
    pub fn new(ps_path: impl Into<PathBuf>) -> Self {
        Self {
            ps_path: ps_path.into(),
        }
    }

    async fn field(&self, pid: u32, field: &str) -> Option<String> {
        let output = match Command::new(&self.ps_path)
            .args(["-o", &format!("{}=", field), "-p", &pid.to_string()])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                debug!(pid = pid, field = field, error = %e, "Failed to run ps");
                return None;
            }
        };

        // ps -p exits 1 when the process does not exist
        if !output.status.success() {
            return None;
        }

        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

/// `comm` is the executable path on macOS; keep the last component.
fn command_basename(comm: &str) -> String {
    comm.rsplit('/').next().unwrap_or(comm).to_string()
}

/// `rss` is reported in KiB.
fn parse_rss_kib(rss: &str) -> Option<u64> {
    rss.trim().parse::<u64>().ok().map(|kib| kib * 1024)
}

impl ProcessInspector for PsInspector {
    async fn name(&self, pid: u32) -> Option<String> {
        self.field(pid, "comm").await.map(|comm| command_basename(&comm))
    }

    async fn resident_memory(&self, pid: u32) -> Option<u64> {
        self.field(pid, "rss").await.and_then(|rss| parse_rss_kib(&rss))
    }
}
