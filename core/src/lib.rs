//! Sysport Core Library
//!
//! Listening-port discovery and race-aware process termination.
//! Provides functionality to:
//! - List listening TCP and UDP ports with their owning processes
//! - Free a port by terminating its owner (SIGTERM, then SIGKILL if needed)
//! - Sample a system overview (memory, CPU, disks, top processes)
//! - Load user configuration
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure data models
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: OS implementations of the ports
//! - `application`: Use case services
//! - `engine`: Wires the platform adapters into the services
//!
//! # Platform Support
//! - Linux: `ss` for sockets, procfs for process details
//! - macOS: `lsof` for sockets, `ps` for process details
//! - Windows: not supported

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub mod config;
pub mod engine;
pub mod error;
pub mod overview;

// Re-export domain types (primary API)
pub use domain::{
    parse_port_args, Escalation, KillOutcome, ListeningPort, ProcessDetails, Protocol, RawSocket,
    Termination, TerminationSignal, GRACE_PERIOD, UNKNOWN_PROCESS,
};

// Re-export other commonly used types
pub use application::{resolve_process, PortEnumerator, TerminationController};
pub use config::{Config, ConfigStore};
pub use engine::{SysportEngine, SystemController};
pub use error::{Error, ErrorKind, Result};
pub use overview::SystemSnapshot;
pub use ports::{is_affirmative, ConfirmationGate};
