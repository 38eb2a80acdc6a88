//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`.
//! Each adapter handles communication with the operating system.

pub mod process;
pub mod scanner;
pub mod signal;
pub mod timer;

// Re-export main types for convenience
pub use process::SystemInspector;
pub use scanner::SystemSocketTable;
pub use signal::NixSignaller;
pub use timer::TokioTimer;
