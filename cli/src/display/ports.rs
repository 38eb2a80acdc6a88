//! Listening ports and kill results.

use crossterm::style::ContentStyle;
use sysport_core::{Error, ListeningPort, Protocol};

use super::{format_iec_bytes, truncate, Theme};

const HEADER: &str = "◈ LISTENING PORTS";

/// Well-known ports are critical, registered ports up to 10000 a warning.
fn port_style(theme: &Theme, port: u16) -> ContentStyle {
    if port < 1024 {
        theme.critical
    } else if port <= 10000 {
        theme.warning
    } else {
        theme.normal
    }
}

fn protocol(theme: &Theme, protocol: Protocol) -> String {
    match protocol {
        Protocol::Tcp => theme.paint(theme.normal, "→ TCP"),
        Protocol::Udp => theme.paint(theme.warning, "⚡ UDP"),
    }
}

/// Port table. Expects `ports` already sorted.
pub fn ports_table(theme: &Theme, ports: &[ListeningPort]) -> String {
    let mut out = theme.paint(theme.header, HEADER);

    if ports.is_empty() {
        out.push_str("\n  No ports currently listening");
        return out;
    }

    out.push_str("\n\n");
    for (i, port) in ports.iter().enumerate() {
        out.push_str(&format!(
            "  {}  ⟳ {}  {}  {}  {}  {}\n",
            i + 1,
            theme.paint(port_style(theme, port.port), format!("{:5}", port.port)),
            protocol(theme, port.protocol),
            theme.paint(theme.muted, truncate(&port.process_name, 25)),
            theme.paint(theme.muted, format!("[PID: {}]", port.owner_pid)),
            theme.paint(theme.normal, format_iec_bytes(port.resident_memory_bytes)),
        ));
    }

    out.push_str(&format!("\n  Total: {} ports", ports.len()));
    out
}

/// The target details followed by the yes/no prompt (no trailing newline).
pub fn kill_confirmation(theme: &Theme, target: &ListeningPort) -> String {
    format!(
        "{}\n\n  ⟳ {}  {}  {}  {}  {}\n\n{}",
        theme.paint(theme.header, "⚠ KILL CONFIRMATION"),
        theme.paint(theme.success, target.port),
        protocol(theme, target.protocol),
        theme.paint(theme.muted, truncate(&target.process_name, 30)),
        theme.paint(theme.muted, format!("[PID: {}]", target.owner_pid)),
        theme.paint(theme.normal, format_iec_bytes(target.resident_memory_bytes)),
        theme.paint(theme.label, "  Confirm termination? [y/N]: "),
    )
}

pub fn kill_success(theme: &Theme, port: u16, process_name: &str) -> String {
    theme.paint(
        theme.success,
        format!("✓ Port {} ({}) killed successfully", port, process_name),
    )
}

pub fn kill_error(theme: &Theme, port: u16, error: &Error) -> String {
    theme.paint(
        theme.error,
        format!("✗ Failed to kill port {}: {}", port, error),
    )
}

pub fn port_not_listening(theme: &Theme, port: u16) -> String {
    theme.paint(theme.error, format!("✗ Port {} is not listening", port))
}

pub fn kill_cancelled(theme: &Theme) -> String {
    theme.paint(theme.label, "Kill cancelled")
}
