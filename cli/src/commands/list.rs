//! List command - show all listening ports.

use anyhow::Result;
use sysport_core::SysportEngine;

use crate::display::{ports, Theme};

/// Errors are reported on stderr; the command itself always succeeds.
pub async fn run(engine: &SysportEngine, theme: &Theme, json: bool) -> Result<()> {
    let listening = match engine.list_ports().await {
        Ok(listening) => listening,
        Err(e) => {
            eprintln!("Error getting listening ports: {}", e);
            return Ok(());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&listening)?);
        return Ok(());
    }

    println!("{}", ports::ports_table(theme, &listening));
    Ok(())
}
