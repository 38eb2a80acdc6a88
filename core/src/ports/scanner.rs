//! Socket table port (interface).

use crate::domain::RawSocket;
use crate::error::Result;

/// Port for reading the OS connection table.
///
/// Implementations handle platform-specific details (ss, lsof, ...) and
/// return every socket they see, unfiltered. Filtering, deduplication and
/// owner resolution happen in the application layer.
pub trait SocketTable: Send + Sync {
    /// Read all TCP and UDP sockets, IPv4 and IPv6.
    ///
    /// Fails only when the table itself cannot be read.
    fn sockets(&self) -> impl std::future::Future<Output = Result<Vec<RawSocket>>> + Send;
}
