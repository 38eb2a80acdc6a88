//! Sysport Engine - Platform wiring for the application services.
//!
//! Builds the socket table, process inspector, signaller and grace timer of
//! the current platform from a [`Config`] and exposes the port use cases
//! behind one type, so front ends never name the adapters.

use tracing::debug;

use crate::adapters::{NixSignaller, SystemInspector, SystemSocketTable, TokioTimer};
use crate::application::{PortEnumerator, TerminationController};
use crate::config::Config;
use crate::domain::ListeningPort;
use crate::error::Result;

/// The termination controller over the current platform's adapters.
pub type SystemController =
    TerminationController<SystemSocketTable, SystemInspector, NixSignaller, TokioTimer>;

/// The main Sysport engine.
///
/// Holds no state besides its adapters: every call queries the OS afresh.
pub struct SysportEngine {
    controller: SystemController,
}

impl SysportEngine {
    /// Create an engine with default tool paths.
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Create an engine whose adapters use the tool paths in `config`.
    pub fn from_config(config: &Config) -> Self {
        debug!(
            ss = %config.ss_path.display(),
            lsof = %config.lsof_path.display(),
            ps = %config.ps_path.display(),
            "Building platform adapters"
        );

        let enumerator = PortEnumerator::new(
            SystemSocketTable::from_config(config),
            SystemInspector::from_config(config),
        );

        Self {
            controller: TerminationController::new(enumerator, NixSignaller::new(), TokioTimer),
        }
    }

    /// List listening ports, sorted ascending by port number.
    pub async fn list_ports(&self) -> Result<Vec<ListeningPort>> {
        let mut ports = self.controller.enumerator().list_listening_ports().await?;
        ports.sort_by_key(|p| p.port);
        Ok(ports)
    }

    /// Port lookup and termination on the current platform.
    pub fn controller(&self) -> &SystemController {
        &self.controller
    }
}

impl Default for SysportEngine {
    fn default() -> Self {
        Self::new()
    }
}
