//! Linux process inspector using procfs.

use procfs::process::Process;
use tracing::debug;

use crate::ports::ProcessInspector;

/// Reads `/proc/<pid>/stat` for the name and `/proc/<pid>/status` for memory.
pub struct ProcfsInspector;

impl ProcfsInspector {
    pub fn new() -> Self {
        Self
    }

    fn open(pid: u32) -> Option<Process> {
        let pid = i32::try_from(pid).ok()?;
        match Process::new(pid) {
            Ok(process) => Some(process),
            Err(e) => {
                debug!(pid = pid, error = %e, "Cannot open process");
                None
            }
        }
    }
}

impl ProcessInspector for ProcfsInspector {
    async fn name(&self, pid: u32) -> Option<String> {
        let process = Self::open(pid)?;
        match process.stat() {
            Ok(stat) => Some(stat.comm),
            Err(e) => {
                debug!(pid = pid, error = %e, "Cannot read process name");
                None
            }
        }
    }

    async fn resident_memory(&self, pid: u32) -> Option<u64> {
        let process = Self::open(pid)?;
        match process.status() {
            // VmRSS is reported in kB and absent for kernel threads.
            Ok(status) => status.vmrss.map(|kb| kb * 1024),
            Err(e) => {
                debug!(pid = pid, error = %e, "Cannot read process memory");
                None
            }
        }
    }
}
