//! Disks command - usage of every mounted filesystem.

use anyhow::Result;
use sysport_core::overview;

use crate::display::{disks, Theme};

/// Errors are reported on stderr; the command itself always succeeds.
pub fn run(theme: &Theme, json: bool) -> Result<()> {
    let listed = match overview::list_disks() {
        Ok(listed) => listed,
        Err(e) => {
            eprintln!("Error getting disk info: {}", e);
            return Ok(());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }

    println!("{}", disks::disk_usage(theme, &listed));
    Ok(())
}
