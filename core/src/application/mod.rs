//! Application layer - Use case services.
//!
//! This module contains application services that orchestrate
//! domain logic and adapter interactions.
//!
//! Services are thin orchestrators that:
//! - Accept domain types as inputs
//! - Use ports (traits) for external dependencies
//! - Return domain types as outputs
//!
//! None of them cache: every call performs its own OS queries.

mod port_service;
mod resolver;
mod termination;

pub use port_service::PortEnumerator;
pub use resolver::resolve_process;
pub use termination::TerminationController;
