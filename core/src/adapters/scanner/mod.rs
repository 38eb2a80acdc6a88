//! Socket table adapters.
//!
//! Platform-specific implementations of the OS connection table query.

#[cfg(target_os = "macos")]
mod darwin;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
mod unsupported;

#[cfg(any(target_os = "linux", target_os = "macos", test))]
mod utils;

use crate::config::Config;
use crate::domain::RawSocket;
use crate::error::Result;
use crate::ports::SocketTable;

/// The socket table of the current platform.
pub struct SystemSocketTable {
    #[cfg(target_os = "macos")]
    inner: darwin::DarwinScanner,

    #[cfg(target_os = "linux")]
    inner: linux::LinuxScanner,

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    inner: unsupported::UnsupportedScanner,
}

impl SystemSocketTable {
    /// Create a socket table reader for the current platform.
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Create a socket table reader using the tool paths from `config`.
    #[allow(unused_variables)]
    pub fn from_config(config: &Config) -> Self {
        Self {
            #[cfg(target_os = "macos")]
            inner: darwin::DarwinScanner::new(config.lsof_path.clone()),

            #[cfg(target_os = "linux")]
            inner: linux::LinuxScanner::new(config.ss_path.clone()),

            #[cfg(not(any(target_os = "linux", target_os = "macos")))]
            inner: unsupported::UnsupportedScanner,
        }
    }
}

impl Default for SystemSocketTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SocketTable for SystemSocketTable {
    async fn sockets(&self) -> Result<Vec<RawSocket>> {
        self.inner.scan().await
    }
}

/// Internal trait for platform-specific implementations.
trait Scanner: Send + Sync {
    fn scan(&self) -> impl std::future::Future<Output = Result<Vec<RawSocket>>> + Send;
}
