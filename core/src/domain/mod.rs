//! Domain layer - Pure data models for listening ports and termination.
//!
//! These types have no I/O dependencies and can be tested in isolation.

mod port;
mod termination;

pub use port::{
    parse_port_args, ListeningPort, ProcessDetails, Protocol, RawSocket, IPPROTO_TCP,
    IPPROTO_UDP, UNKNOWN_PROCESS,
};
pub use termination::{Escalation, KillOutcome, Termination, TerminationSignal, GRACE_PERIOD};
