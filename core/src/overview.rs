//! System overview snapshot: memory, CPU, disks and the heaviest processes.
//!
//! Read-only; nothing here signals or modifies processes.

use serde::Serialize;
use sysinfo::{Disks, System};
use tracing::debug;

use crate::error::{Error, Result};

/// Memory usage in bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryUsage {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
    pub used_percent: f64,
}

/// Whether a volume holds user-facing storage or belongs to the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiskCategory {
    /// Root, user data and external drives.
    Primary,
    /// Everything else (boot, firmware, snap mounts, ...).
    System,
}

/// Space usage of one mounted filesystem.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskUsage {
    pub mount_point: String,
    /// Device or volume name reported by the OS.
    pub device: String,
    pub label: String,
    pub category: DiskCategory,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    pub used_percent: f64,
}

impl DiskUsage {
    pub fn new(mount_point: impl Into<String>, device: impl Into<String>, total: u64, free: u64) -> Self {
        let mount_point = mount_point.into();
        let (label, category) = disk_label(&mount_point);
        let used = total.saturating_sub(free);
        Self {
            mount_point,
            device: device.into(),
            label,
            category,
            total_bytes: total,
            used_bytes: used,
            free_bytes: free,
            used_percent: percent(used, total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessUsage {
    pub pid: u32,
    pub name: String,
    pub resident_memory_bytes: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemSnapshot {
    pub memory: MemoryUsage,
    /// Average usage across all cores.
    pub cpu_percent: f64,
    /// Mounted filesystems, primary volumes first.
    pub disks: Vec<DiskUsage>,
    /// Processes by resident memory, largest first.
    pub top_processes: Vec<ProcessUsage>,
}

impl SystemSnapshot {
    /// The disk shown as the headline figure: `/` when mounted, else the first.
    pub fn primary_disk(&self) -> Option<&DiskUsage> {
        self.disks
            .iter()
            .find(|d| d.mount_point == "/")
            .or_else(|| self.disks.first())
    }
}

/// `part / whole` as a percentage, 0 when `whole` is 0.
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Human label and category for a mount point.
///
/// `/` is "System Root"; `/home` and the macOS data volume are "User Data";
/// `/Volumes/<name>` and `/media/<name>` are "External: <name>". Anything
/// else is a system volume labelled with its mount point.
pub fn disk_label(mount_point: &str) -> (String, DiskCategory) {
    match mount_point {
        "/" => return ("System Root".to_string(), DiskCategory::Primary),
        "/home" | "/System/Volumes/Data" => {
            return ("User Data".to_string(), DiskCategory::Primary)
        }
        _ => {}
    }

    for prefix in ["/Volumes/", "/media/"] {
        if let Some(name) = mount_point.strip_prefix(prefix) {
            if !name.is_empty() {
                return (format!("External: {}", name), DiskCategory::Primary);
            }
        }
    }

    (mount_point.to_string(), DiskCategory::System)
}

/// Primary volumes before system volumes, `/` leading; otherwise mount order.
pub fn order_disks(mut disks: Vec<DiskUsage>) -> Vec<DiskUsage> {
    disks.sort_by_key(|d| {
        (
            d.category != DiskCategory::Primary,
            d.mount_point != "/",
        )
    });
    disks
}

/// Every mounted filesystem, ordered by [`order_disks`].
pub fn list_disks() -> Result<Vec<DiskUsage>> {
    if !sysinfo::IS_SUPPORTED_SYSTEM {
        return Err(Error::UnsupportedPlatform(std::env::consts::OS.to_string()));
    }
    Ok(read_disks())
}

fn read_disks() -> Vec<DiskUsage> {
    let disks = Disks::new_with_refreshed_list()
        .iter()
        .map(|disk| {
            DiskUsage::new(
                disk.mount_point().display().to_string(),
                disk.name().to_string_lossy(),
                disk.total_space(),
                disk.available_space(),
            )
        })
        .collect();
    order_disks(disks)
}

/// Take a snapshot of the system, listing the `top_n` heaviest processes.
///
/// CPU usage needs two samples; this waits
/// [`sysinfo::MINIMUM_CPU_UPDATE_INTERVAL`] between them.
pub async fn sample(top_n: usize) -> Result<SystemSnapshot> {
    if !sysinfo::IS_SUPPORTED_SYSTEM {
        return Err(Error::UnsupportedPlatform(std::env::consts::OS.to_string()));
    }

    let mut sys = System::new_all();
    tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;
    sys.refresh_cpu_usage();

    let cpus = sys.cpus();
    let cpu_percent = if cpus.is_empty() {
        0.0
    } else {
        cpus.iter().map(|c| f64::from(c.cpu_usage())).sum::<f64>() / cpus.len() as f64
    };

    let memory = MemoryUsage {
        total_bytes: sys.total_memory(),
        used_bytes: sys.used_memory(),
        available_bytes: sys.available_memory(),
        used_percent: percent(sys.used_memory(), sys.total_memory()),
    };

    let processes = sys
        .processes()
        .iter()
        .map(|(pid, process)| ProcessUsage {
            pid: pid.as_u32(),
            name: process.name().to_string_lossy().to_string(),
            resident_memory_bytes: process.memory(),
        })
        .collect();
    let top_processes = top_by_memory(processes, top_n);

    debug!(
        cpus = cpus.len(),
        processes = sys.processes().len(),
        "Sampled system overview"
    );

    Ok(SystemSnapshot {
        memory,
        cpu_percent,
        disks: read_disks(),
        top_processes,
    })
}

/// Keep the `n` largest processes by resident memory, largest first.
fn top_by_memory(mut processes: Vec<ProcessUsage>, n: usize) -> Vec<ProcessUsage> {
    processes.sort_by(|a, b| {
        b.resident_memory_bytes
            .cmp(&a.resident_memory_bytes)
            .then(a.pid.cmp(&b.pid))
    });
    processes.truncate(n);
    processes
}
