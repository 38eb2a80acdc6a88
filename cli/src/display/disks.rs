//! Disk usage listing.

use sysport_core::overview::{DiskCategory, DiskUsage};

use super::overview::{colored_percent, progress_bar};
use super::{format_iec_bytes, truncate, Theme};

const BAR_WIDTH: usize = 30;

/// Render primary volumes in detail, then system volumes one per line.
pub fn disk_usage(theme: &Theme, disks: &[DiskUsage]) -> String {
    if disks.is_empty() {
        return "No disks found".to_string();
    }

    let (primary, system): (Vec<&DiskUsage>, Vec<&DiskUsage>) = disks
        .iter()
        .partition(|d| d.category == DiskCategory::Primary);

    let mut out = String::new();

    if !primary.is_empty() {
        out.push_str(&theme.paint(theme.title, "◈ PRIMARY STORAGE"));
        out.push_str("\n\n");
        for disk in primary {
            let percent = disk.used_percent as u32;
            out.push_str(&format!(
                "{}  {}\n",
                theme.paint(theme.header, &disk.label),
                theme.paint(theme.muted, &disk.device)
            ));
            out.push_str(&format!(
                "{} {}\n",
                theme.paint(theme.bar, progress_bar(percent, BAR_WIDTH)),
                colored_percent(theme, percent)
            ));
            out.push_str(&theme.paint(
                theme.label,
                format!(
                    "{} used  •  {} free  •  {} total",
                    format_iec_bytes(disk.used_bytes),
                    format_iec_bytes(disk.free_bytes),
                    format_iec_bytes(disk.total_bytes)
                ),
            ));
            out.push_str("\n\n");
        }
    }

    if !system.is_empty() {
        out.push_str(&theme.paint(theme.title, "◈ SYSTEM VOLUMES"));
        out.push('\n');
        for disk in system {
            let name = format!("{:<30}", truncate(&disk.label, 30));
            out.push_str(&format!(
                "  • {}  {} used ({})\n",
                theme.paint(theme.metric, name),
                format_iec_bytes(disk.used_bytes),
                colored_percent(theme, disk.used_percent as u32)
            ));
        }
    }

    out.truncate(out.trim_end().len());
    out
}
