//! Signal publishing/subscription abstraction.
//!
//! Broadcast semantics: each subscriber gets a copy of every published
//! signal. The bus carries control signals, not data — losing a duplicate
//! is fine, losing the only delivery is not, so implementations fan out to
//! every live subscriber on publish.

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to a signal stream.
///
/// Designed for single-threaded consumption: one subscription, one consumer
/// loop. The typical consumer polls with [`Subscription::recv_timeout`] so
/// it can also observe a shutdown flag between signals.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next signal is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a signal without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a signal.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Pub/sub contract for session signals.
///
/// `publish` must not block on slow consumers and must not fail the calling
/// request path: the gateway fires signals fire-and-forget, and the original
/// error keeps propagating to the call site regardless.
pub trait SignalBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> SignalBus<M> for Arc<B>
where
    B: SignalBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
