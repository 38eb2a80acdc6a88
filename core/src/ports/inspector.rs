//! Process inspector port (interface).

/// Port for looking up process metadata by PID.
///
/// Both lookups are best-effort and independent of each other: a process
/// whose name cannot be read may still report its memory, and vice versa.
pub trait ProcessInspector: Send + Sync {
    /// Display name of the process, if it can be read.
    fn name(&self, pid: u32) -> impl std::future::Future<Output = Option<String>> + Send;

    /// Resident set size in bytes, if it can be read.
    fn resident_memory(&self, pid: u32) -> impl std::future::Future<Output = Option<u64>> + Send;
}
