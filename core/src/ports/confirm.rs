//! Confirmation gate port (interface).

use crate::domain::ListeningPort;

/// Port for asking the user to approve a termination.
///
/// Called once per port, after resolution and before any signal is sent.
/// Returning `false` cancels the kill for that port only.
pub trait ConfirmationGate {
    fn confirm(&mut self, target: &ListeningPort) -> bool;
}

impl<F> ConfirmationGate for F
where
    F: FnMut(&ListeningPort) -> bool,
{
    fn confirm(&mut self, target: &ListeningPort) -> bool {
        self(target)
    }
}

/// Whether a typed answer approves the termination.
///
/// Only `y` or `Y`, ignoring surrounding whitespace, is affirmative.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
