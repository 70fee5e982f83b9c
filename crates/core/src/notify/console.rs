use std::io::{self, Write};

use tracing::info;

use super::Notifier;

/// Notifier that writes to standard output.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, body: &str) {
        info!(title, body, "notification");

        let mut stdout = io::stdout().lock();
        // Nothing useful to do if stdout is gone.
        let _ = writeln!(stdout, "{}: {}", title, body);
    }
}
