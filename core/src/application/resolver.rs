//! Best-effort owner resolution.

use tracing::debug;

use crate::domain::{ProcessDetails, UNKNOWN_PROCESS};
use crate::ports::ProcessInspector;

/// Resolve the display name and resident memory of `pid`.
///
/// Never fails. pid 0 means "no owner" and performs no lookup. Otherwise the
/// name and memory lookups run independently and each falls back to its own
/// default (`"unknown"` / 0).
pub async fn resolve_process<P: ProcessInspector>(inspector: &P, pid: u32) -> ProcessDetails {
    if pid == 0 {
        return ProcessDetails::unknown();
    }

    let name = inspector.name(pid).await;
    let memory = inspector.resident_memory(pid).await;

    if name.is_none() || memory.is_none() {
        debug!(
            pid = pid,
            name_resolved = name.is_some(),
            memory_resolved = memory.is_some(),
            "Partial process resolution"
        );
    }

    ProcessDetails {
        name: name.unwrap_or_else(|| UNKNOWN_PROCESS.to_string()),
        resident_memory_bytes: memory.unwrap_or(0),
    }
}
