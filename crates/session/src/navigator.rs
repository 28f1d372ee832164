//! Navigation seam.
//!
//! The store decides *when* to move the user (forced logout lands on the
//! login entry point); the host UI decides *how*. Injected so headless and
//! test builds can run without a router.

pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigator that goes nowhere; for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, _path: &str) {}
}
