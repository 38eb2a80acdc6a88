//! Terminal rendering.
//!
//! Every function here is pure: it takes a [`Theme`] and data, and returns
//! the text to print.

pub mod disks;
pub mod overview;
pub mod ports;

use std::fmt::Display;

use crossterm::style::{Attribute, Color, ContentStyle};

/// Styles used by the renderers.
///
/// Built once per invocation and passed explicitly. A disabled theme renders
/// plain text with no escape sequences.
#[derive(Debug, Clone)]
pub struct Theme {
    enabled: bool,
    pub title: ContentStyle,
    pub header: ContentStyle,
    pub label: ContentStyle,
    pub muted: ContentStyle,
    pub metric: ContentStyle,
    pub normal: ContentStyle,
    pub warning: ContentStyle,
    pub critical: ContentStyle,
    pub success: ContentStyle,
    pub error: ContentStyle,
    pub bar: ContentStyle,
}

impl Theme {
    pub fn colored() -> Self {
        Self {
            enabled: true,
            title: bold(Color::Cyan),
            header: bold(Color::Rgb {
                r: 0x7d,
                g: 0x56,
                b: 0xf4,
            }),
            label: fg(Color::Grey),
            muted: fg(Color::DarkGrey),
            metric: fg(Color::White),
            normal: fg(Color::Green),
            warning: fg(Color::Yellow),
            critical: bold(Color::Red),
            success: bold(Color::Green),
            error: bold(Color::Red),
            bar: fg(Color::Green),
        }
    }

    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::colored()
        }
    }

    pub fn new(color: bool) -> Self {
        if color {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Render `text` in `style`, or as-is when styling is off.
    pub fn paint(&self, style: ContentStyle, text: impl Display) -> String {
        if self.enabled {
            style.apply(text).to_string()
        } else {
            text.to_string()
        }
    }
}

fn fg(color: Color) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(color),
        ..ContentStyle::default()
    }
}

fn bold(color: Color) -> ContentStyle {
    ContentStyle {
        attributes: Attribute::Bold.into(),
        ..fg(color)
    }
}

/// Shorten to at most `max` characters, marking the cut with `...`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Format a byte count with binary units (`1.5 KiB`, `82 MiB`).
pub fn format_iec_bytes(bytes: u64) -> String {
    format_bytes(bytes, 1024.0, &["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"])
}

/// Format a byte count with decimal units (`1.5 kB`, `500 GB`).
pub fn format_si_bytes(bytes: u64) -> String {
    format_bytes(bytes, 1000.0, &["B", "kB", "MB", "GB", "TB", "PB", "EB"])
}

fn format_bytes(bytes: u64, base: f64, units: &[&str]) -> String {
    if (bytes as f64) < base {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= base && unit < units.len() - 1 {
        value /= base;
        unit += 1;
    }

    // One decimal below 10, none above.
    if value < 10.0 {
        format!("{:.1} {}", value, units[unit])
    } else {
        format!("{:.0} {}", value, units[unit])
    }
}
