//! Start/end gate with a minimum visible duration
//!
//! Typical use: show a loading indicator on `start`, hide it on `end`,
//! and never let it flash for less than `min_interval_ms`.
//!
//! One gate tracks one window. A second `start` before `end` overwrites
//! the first start instant; overlapping windows need separate gates.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use parking_lot::Mutex;
use serde::Deserialize;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::error::UtilError;

/// Gate configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct GateOptions {
    /// Minimum time between `start` and the end action, in ms
    #[serde(default)]
    pub min_interval_ms: u64,
}

impl GateOptions {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

/// Start/end pair enforcing a minimum elapsed time
///
/// Clones share the same start instant.
#[derive(Debug, Clone, Default)]
pub struct TimingGate {
    min_interval: Duration,
    started_at: Arc<Mutex<Option<Instant>>>,
}

impl TimingGate {
    pub fn new(options: GateOptions) -> Self {
        Self {
            min_interval: options.min_interval(),
            started_at: Arc::new(Mutex::new(None)),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Record the start instant
    pub fn start(&self) {
        self.start_with(|| ())
    }

    /// Record the start instant, then run `action` right away
    pub fn start_with<R>(&self, action: impl FnOnce() -> R) -> R {
        *self.started_at.lock() = Some(Instant::now());
        action()
    }

    /// Time left before an end action may run; None when it may run now
    ///
    /// A gate that was never started is always due.
    pub fn remaining(&self) -> Option<Duration> {
        let started = (*self.started_at.lock())?;
        self.min_interval
            .checked_sub(started.elapsed())
            .filter(|left| !left.is_zero())
    }

    pub fn end(&self) -> GateCompletion<()> {
        self.end_with(|| ())
    }

    /// Run `action` once the minimum interval has passed
    ///
    /// If it already has, `action` runs inside this call and the returned
    /// future is ready. Otherwise `action` is spawned behind a timer on the
    /// current tokio runtime; it fires even if the returned future is
    /// dropped, and there is no way to cancel it.
    ///
    /// # Panics
    ///
    /// The delayed branch panics when called outside a tokio runtime.
    pub fn end_with<F, R>(&self, action: F) -> GateCompletion<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        match self.remaining() {
            None => GateCompletion {
                state: State::Ready(Some(action())),
            },
            Some(delay) => {
                debug!(delay_ms = delay.as_millis() as u64, "holding gate end");
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    action()
                });
                GateCompletion {
                    state: State::Delayed(handle),
                }
            }
        }
    }
}

/// Resolves once the end action has run, yielding its result
#[must_use = "the end action runs regardless; await this to observe completion"]
pub struct GateCompletion<R> {
    state: State<R>,
}

enum State<R> {
    Ready(Option<R>),
    Delayed(JoinHandle<R>),
}

impl<R> GateCompletion<R> {
    /// True once the end action has run
    pub fn is_finished(&self) -> bool {
        match &self.state {
            State::Ready(_) => true,
            State::Delayed(handle) => handle.is_finished(),
        }
    }
}

// R is only ever moved out of the Option, never pinned
impl<R> Unpin for GateCompletion<R> {}

impl<R> Future for GateCompletion<R> {
    type Output = Result<R, UtilError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            State::Ready(value) => Poll::Ready(
                value
                    .take()
                    .ok_or_else(|| UtilError::GateAction("polled after completion".into())),
            ),
            State::Delayed(handle) => Pin::new(handle)
                .poll(cx)
                .map(|joined| joined.map_err(|e| UtilError::GateAction(e.to_string()))),
        }
    }
}
