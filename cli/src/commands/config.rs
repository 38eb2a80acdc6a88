//! Config command - show the effective configuration.

use anyhow::Result;
use sysport_core::Config;

pub fn show(config: &Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
