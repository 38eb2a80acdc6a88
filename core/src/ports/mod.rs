//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces that the application layer uses
//! to interact with the operating system and the user. Implementations
//! live in `adapters` (and, for the confirmation prompt, in the CLI).

mod confirm;
mod inspector;
mod killer;
mod scanner;

pub use confirm::{is_affirmative, ConfirmationGate};
pub use inspector::ProcessInspector;
pub use killer::{GraceTimer, ProcessSignaller};
pub use scanner::SocketTable;
