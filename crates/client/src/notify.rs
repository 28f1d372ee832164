//! User-facing notification seam.
//!
//! The gateway and the stock ledger announce outcomes here; the UI decides
//! how to render them (toast, dialog, status bar). Keeping this a seam lets
//! tests assert what was surfaced without any UI in the process.

use tracing::{error, info};

pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default notifier: routes notifications to the log stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(target: "stockdesk::notify", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "stockdesk::notify", "{message}");
    }
}
