//! Delayed submissions with cancellation.
//!
//! Simulated network latency runs on a background thread so the UI loop
//! keeps drawing. The payload only comes back if the task was not cancelled,
//! and the handle cancels on drop, so a view that goes away can never have
//! its submission applied afterwards.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Granularity of the cancellation check while sleeping.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// State of a pending task as seen from the UI thread.
#[derive(Debug)]
pub enum TaskPoll<T> {
    /// Still waiting.
    Pending,
    /// Delay elapsed; the payload is handed back exactly once.
    Elapsed(T),
    /// Cancelled, or the worker went away without delivering.
    Gone,
}

/// Handle to a running delayed task.
pub struct DelayedTaskHandle<T> {
    rx: Receiver<T>,
    token: CancellationToken,
    started_at: Instant,
    delay: Duration,
    _handle: JoinHandle<()>,
}

impl<T> DelayedTaskHandle<T> {
    /// Check for completion (non-blocking).
    pub fn poll(&self) -> TaskPoll<T> {
        if self.token.is_cancelled() {
            return TaskPoll::Gone;
        }
        match self.rx.try_recv() {
            Ok(payload) => TaskPoll::Elapsed(payload),
            Err(TryRecvError::Empty) => TaskPoll::Pending,
            Err(TryRecvError::Disconnected) => TaskPoll::Gone,
        }
    }

    /// Stop the task; its payload will never be delivered.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Fraction of the delay elapsed, for progress display.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.delay.is_zero() {
            return 1.0;
        }
        (self.started_at.elapsed().as_secs_f64() / self.delay.as_secs_f64()).min(1.0)
    }
}

impl<T> Drop for DelayedTaskHandle<T> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Spawner for delayed tasks.
pub struct DelayedTask;

impl DelayedTask {
    /// Hand `payload` back after `delay` unless cancelled first.
    pub fn spawn<T>(delay: Duration, payload: T) -> DelayedTaskHandle<T>
    where
        T: Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let token = CancellationToken::new();
        let worker_token = token.clone();

        let handle = thread::spawn(move || {
            let deadline = Instant::now() + delay;
            loop {
                if worker_token.is_cancelled() {
                    tracing::debug!("Delayed task cancelled");
                    return;
                }
                let now = Instant::now();
                if now >= deadline {
                    break;
                }
                thread::sleep((deadline - now).min(CANCEL_POLL_INTERVAL));
            }
            let _ = tx.send(payload);
        });

        DelayedTaskHandle {
            rx,
            token,
            started_at: Instant::now(),
            delay,
            _handle: handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wait_for<T>(handle: &DelayedTaskHandle<T>, timeout: Duration) -> TaskPoll<T> {
        let deadline = Instant::now() + timeout;
        loop {
            match handle.poll() {
                TaskPoll::Pending if Instant::now() < deadline => {
                    thread::sleep(Duration::from_millis(5));
                }
                other => return other,
            }
        }
    }

    #[test]
    fn test_delivers_after_delay() {
        let handle = DelayedTask::spawn(Duration::from_millis(30), 42);
        match wait_for(&handle, Duration::from_secs(2)) {
            TaskPoll::Elapsed(v) => assert_eq!(v, 42),
            other => panic!("Expected Elapsed, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_delay_delivers() {
        let handle = DelayedTask::spawn(Duration::ZERO, "now");
        assert!(matches!(
            wait_for(&handle, Duration::from_secs(2)),
            TaskPoll::Elapsed("now")
        ));
        assert!((handle.progress() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cancelled_never_delivers() {
        let handle = DelayedTask::spawn(Duration::from_millis(50), 7);
        handle.cancel();
        thread::sleep(Duration::from_millis(120));
        assert!(matches!(handle.poll(), TaskPoll::Gone));
    }

    #[test]
    fn test_drop_cancels() {
        let handle = DelayedTask::spawn(Duration::from_secs(10), ());
        let token = handle.token.clone();
        drop(handle);
        assert!(token.is_cancelled());
    }
}
