//! Listening port domain models.

use serde::Serialize;

use crate::error::{Error, Result};

/// Process name reported when the owner cannot be resolved.
pub const UNKNOWN_PROCESS: &str = "unknown";

/// IANA transport protocol number for TCP.
pub const IPPROTO_TCP: u8 = 6;

/// IANA transport protocol number for UDP.
pub const IPPROTO_UDP: u8 = 17;

// ============================================================================
// Protocol
// ============================================================================

/// Transport protocol of a listening socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
}

impl Protocol {
    /// Classify a raw transport protocol number.
    ///
    /// Only 17 is UDP; every other number is treated as TCP.
    pub fn from_number(number: u8) -> Self {
        if number == IPPROTO_UDP {
            Protocol::Udp
        } else {
            Protocol::Tcp
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RawSocket
// ============================================================================

/// One row of the OS connection table, as reported by a socket table adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSocket {
    /// Local port the socket is bound to (0 if unbound).
    pub local_port: u16,
    /// Local bind address (e.g. "*", "127.0.0.1", "[::1]").
    pub address: String,
    /// IANA transport protocol number.
    pub protocol_number: u8,
    /// Raw socket state string, empty when the OS reports none.
    pub state: String,
    /// Owning process id, 0 when the table names no owner.
    pub pid: u32,
}

impl RawSocket {
    pub fn new(
        local_port: u16,
        address: impl Into<String>,
        protocol_number: u8,
        state: impl Into<String>,
        pid: u32,
    ) -> Self {
        Self {
            local_port,
            address: address.into(),
            protocol_number,
            state: state.into(),
            pid,
        }
    }

    /// Whether this socket counts as listening.
    ///
    /// TCP sockets must be exactly `LISTEN`. Datagram sockets carry no
    /// connection state (`ss` prints `UNCONN`, `lsof` prints nothing) and are
    /// always eligible in that case.
    pub fn is_listening(&self) -> bool {
        if self.state == "LISTEN" {
            return true;
        }
        self.protocol_number == IPPROTO_UDP && (self.state.is_empty() || self.state == "UNCONN")
    }
}

// ============================================================================
// ProcessDetails
// ============================================================================

/// Display name and resident memory of a process, as far as they could be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessDetails {
    pub name: String,
    pub resident_memory_bytes: u64,
}

impl ProcessDetails {
    /// Details for an owner that could not be resolved at all.
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN_PROCESS.to_string(),
            resident_memory_bytes: 0,
        }
    }
}

impl Default for ProcessDetails {
    fn default() -> Self {
        Self::unknown()
    }
}

// ============================================================================
// ListeningPort
// ============================================================================

/// A point-in-time snapshot of one listening port and its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListeningPort {
    /// The port number, unique within one enumeration.
    pub port: u16,
    pub protocol: Protocol,
    /// Raw socket state as reported by the OS.
    pub state: String,
    /// Local bind address.
    pub address: String,
    /// Owning process id; 0 means no identifiable owner.
    pub owner_pid: u32,
    /// Owner's display name, `"unknown"` when resolution failed.
    pub process_name: String,
    /// Owner's resident memory in bytes, 0 when resolution failed.
    pub resident_memory_bytes: u64,
}

impl ListeningPort {
    /// Build a snapshot from a raw socket row and the resolved owner details.
    pub fn from_raw(raw: &RawSocket, details: ProcessDetails) -> Self {
        Self {
            port: raw.local_port,
            protocol: Protocol::from_number(raw.protocol_number),
            state: raw.state.clone(),
            address: raw.address.clone(),
            owner_pid: raw.pid,
            process_name: details.name,
            resident_memory_bytes: details.resident_memory_bytes,
        }
    }

    /// Whether an owning process was identified.
    pub fn has_owner(&self) -> bool {
        self.owner_pid != 0
    }
}

impl std::fmt::Display for ListeningPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} (PID: {}, Process: {})",
            self.port, self.protocol, self.owner_pid, self.process_name
        )
    }
}

// ============================================================================
// Port arguments
// ============================================================================

/// Validate user-supplied port arguments.
///
/// The first malformed or out-of-range argument aborts the whole batch: no
/// port is returned, so nothing is queried or signalled.
pub fn parse_port_args<S: AsRef<str>>(args: &[S]) -> Result<Vec<u16>> {
    let mut ports = Vec::with_capacity(args.len());
    for arg in args {
        let arg = arg.as_ref();
        let value: i64 = arg
            .parse()
            .map_err(|_| Error::InvalidPort(arg.to_string()))?;
        if !(1..=i64::from(u16::MAX)).contains(&value) {
            return Err(Error::PortOutOfRange(value));
        }
        ports.push(value as u16);
    }
    Ok(ports)
}

// ============================================================================
// Tests
// ============================================================================
