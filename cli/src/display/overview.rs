//! System overview panel.

use chrono::{DateTime, Local};
use crossterm::style::ContentStyle;
use sysport_core::SystemSnapshot;

use super::{format_si_bytes, truncate, Theme};

const BAR_WIDTH: usize = 10;

fn percent_style(theme: &Theme, percent: u32) -> ContentStyle {
    if percent >= 80 {
        theme.critical
    } else if percent >= 60 {
        theme.warning
    } else {
        theme.normal
    }
}

pub(crate) fn colored_percent(theme: &Theme, percent: u32) -> String {
    theme.paint(percent_style(theme, percent), format!("{:3}%", percent))
}

/// Fill is rounded to the nearest cell; values above 100 are clamped.
pub fn progress_bar(percent: u32, width: usize) -> String {
    let percent = percent.min(100) as usize;
    let filled = (percent * width + 50) / 100;
    "█".repeat(filled) + &"░".repeat(width - filled)
}

/// Render a snapshot. `updated` adds a "Last updated" stamp (live mode).
pub fn overview(theme: &Theme, snapshot: &SystemSnapshot, updated: Option<DateTime<Local>>) -> String {
    let mut header = "📊  SYSTEM OVERVIEW".to_string();
    if let Some(at) = updated {
        header.push_str(&format!("  (Last updated: {})", at.format("%H:%M:%S")));
    }

    let mut out = theme.paint(theme.title, header);
    out.push_str("\n\n");
    out.push_str(&metrics(theme, snapshot));
    out.push_str("\n\n");
    out.push_str(&processes(theme, snapshot));
    out
}

fn metrics(theme: &Theme, snapshot: &SystemSnapshot) -> String {
    let (disk_used, disk_total, disk_percent) = match snapshot.primary_disk() {
        Some(disk) => (
            format_si_bytes(disk.used_bytes),
            format_si_bytes(disk.total_bytes),
            disk.used_percent as u32,
        ),
        None => ("0".to_string(), "0".to_string(), 0),
    };

    let memory = &snapshot.memory;
    let mem_percent = memory.used_percent as u32;
    let cpu_percent = snapshot.cpu_percent as u32;

    let row = |percent: u32| {
        format!(
            "{}  {}",
            theme.paint(theme.bar, progress_bar(percent, BAR_WIDTH)),
            colored_percent(theme, percent)
        )
    };

    [
        format!(
            "  💾  Disk      {:>6} / {:>6}   {}",
            disk_used,
            disk_total,
            row(disk_percent)
        ),
        format!(
            "  🧠  Memory    {:>6} / {:>6}   {}",
            format_si_bytes(memory.used_bytes),
            format_si_bytes(memory.total_bytes),
            row(mem_percent)
        ),
        format!(
            "  ⚡  CPU        {:6.1}% / 100%   {}",
            snapshot.cpu_percent,
            row(cpu_percent)
        ),
    ]
    .iter()
    .map(|line| theme.paint(theme.metric, line))
    .collect::<Vec<_>>()
    .join("\n")
}

fn processes(theme: &Theme, snapshot: &SystemSnapshot) -> String {
    let mut out = theme.paint(theme.label, "📈  TOP MEMORY PROCESSES:");

    if snapshot.top_processes.is_empty() {
        out.push_str("\n  No processes found");
        return out;
    }

    out.push('\n');
    for (i, process) in snapshot.top_processes.iter().enumerate() {
        let mb = process.resident_memory_bytes as f64 / 1024.0 / 1024.0;
        out.push_str(&format!(
            "  {}  • {:<27}  {:8.1} MB\n",
            i + 1,
            truncate(&process.name, 27),
            mb
        ));
    }
    out.truncate(out.trim_end().len());
    out
}
