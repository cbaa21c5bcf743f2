//! Opening documentation links in the user's browser.

use confcheck_validation::Notifier;
use std::io;
use tracing::debug;

/// Notifier that opens each link with the system's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn notify(&self, link: &str) -> io::Result<()> {
        debug!(link, "opening documentation");
        open::that(link)
    }
}
