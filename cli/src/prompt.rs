//! Interactive kill confirmation on stdin.

use std::io::{self, BufRead, Write};

use sysport_core::{is_affirmative, ConfirmationGate, ListeningPort};

use crate::display::{ports, Theme};

/// Shows the target and reads one answer line from stdin.
///
/// End of input or a read error counts as "no".
pub struct StdinConfirmation<'a> {
    theme: &'a Theme,
}

impl<'a> StdinConfirmation<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl ConfirmationGate for StdinConfirmation<'_> {
    fn confirm(&mut self, target: &ListeningPort) -> bool {
        print!("{}", ports::kill_confirmation(self.theme, target));
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) | Err(_) => {
                println!();
                false
            }
            Ok(_) => is_affirmative(&answer),
        }
    }
}
