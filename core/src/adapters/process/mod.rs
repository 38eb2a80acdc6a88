//! Process inspector adapters.
//!
//! Platform-specific lookups of process name and resident memory.

#[cfg(target_os = "linux")]
mod linux;

#[cfg(any(target_os = "macos", test))]
mod ps;

use crate::config::Config;
use crate::ports::ProcessInspector;

/// The process inspector of the current platform.
pub struct SystemInspector {
    #[cfg(target_os = "linux")]
    inner: linux::ProcfsInspector,

    #[cfg(target_os = "macos")]
    inner: ps::PsInspector,
}

impl SystemInspector {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    #[allow(unused_variables)]
    pub fn from_config(config: &Config) -> Self {
        Self {
            #[cfg(target_os = "linux")]
            inner: linux::ProcfsInspector::new(),

            #[cfg(target_os = "macos")]
            inner: ps::PsInspector::new(config.ps_path.clone()),
        }
    }
}

impl Default for SystemInspector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
impl ProcessInspector for SystemInspector {
    async fn name(&self, pid: u32) -> Option<String> {
        self.inner.name(pid).await
    }

    async fn resident_memory(&self, pid: u32) -> Option<u64> {
        self.inner.resident_memory(pid).await
    }
}

// No lookups elsewhere; every port is reported with unknown owner details.
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
impl ProcessInspector for SystemInspector {
    async fn name(&self, _pid: u32) -> Option<String> {
        None
    }

    async fn resident_memory(&self, _pid: u32) -> Option<u64> {
        None
    }
}
