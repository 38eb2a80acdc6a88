//! Socket table for platforms without a reader (Windows, the BSDs, ...).

use crate::domain::RawSocket;
use crate::error::{Error, Result};

use super::Scanner;

pub struct UnsupportedScanner;

impl Scanner for UnsupportedScanner {
    async fn scan(&self) -> Result<Vec<RawSocket>> {
        Err(Error::UnsupportedPlatform(format!(
            "reading the socket table is not implemented on {}",
            std::env::consts::OS
        )))
    }
}
