//! Forced-logout listener.
//!
//! A dedicated thread drains the signal bus so the reaction (clear session,
//! redirect) does not depend on any async runtime being alive. The loop
//! polls with a timeout so it can observe the shutdown flag between
//! signals.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

use stockdesk_client::SessionSignals;
use stockdesk_events::{SessionSignal, SignalBus};

use crate::store::SessionShared;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Handle to the running listener thread.
pub struct SignalListener {
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SignalListener {
    pub(crate) fn spawn(signals: Arc<SessionSignals>, shared: Arc<SessionShared>) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);
        let subscription = signals.subscribe();

        let handle = std::thread::spawn(move || {
            loop {
                match subscription.recv_timeout(POLL_INTERVAL) {
                    Ok(SessionSignal::ForcedLogout { status }) => {
                        shared.force_logout(status);
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        if flag.load(Ordering::Relaxed) {
                            break;
                        }
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            debug!("signal listener stopped");
        });

        Self {
            shutdown,
            handle: Some(handle),
        }
    }

    /// Stop the thread and wait for it to exit.
    pub fn stop(mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SignalListener {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
