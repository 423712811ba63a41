//! Injectable time source for animation ticks and simulated latency

use std::fmt::Debug;
use std::time::Duration;

use futures_util::future::BoxFuture;

/// Produces delay futures. The returned future owns everything it needs so
/// it can be held across loop iterations of an actor.
pub trait Clock: Send + Sync + Debug {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// Real time backed by the Tokio timer (virtual under `tokio::time::pause`)
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

#[cfg(test)]
pub use recording::RecordingClock;
