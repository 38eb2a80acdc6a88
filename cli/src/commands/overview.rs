//! Overview command - memory, CPU, disks and top processes.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use sysport_core::{overview, Config};

use crate::display::{self, Theme};

/// Print one snapshot.
pub async fn snapshot(config: &Config, theme: &Theme) -> Result<()> {
    match overview::sample(config.top_processes).await {
        Ok(snapshot) => println!("{}", display::overview::overview(theme, &snapshot, None)),
        Err(e) => eprintln!("Error getting system overview: {}", e),
    }
    Ok(())
}

/// Redraw the overview every `live_interval_secs` until interrupted.
pub async fn live(config: &Config, theme: &Theme) -> Result<()> {
    let period = Duration::from_secs(config.live_interval_secs.max(1));
    let mut ticker = tokio::time::interval(period);

    loop {
        ticker.tick().await;

        let snapshot = overview::sample(config.top_processes).await;
        execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
        match snapshot {
            Ok(snapshot) => println!(
                "{}",
                display::overview::overview(theme, &snapshot, Some(Local::now()))
            ),
            Err(e) => eprintln!("Error getting system overview: {}", e),
        }
        io::stdout().flush()?;
    }
}
