//! A cancellable once-per-second message source.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::Sender,
    },
    thread,
    time::{Duration, Instant},
};

use log::trace;

/// How often the stop flag is polled while waiting for the next tick.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// A background thread that sends one message per elapsed period.
///
/// The receiving end merges ticks into the same intent stream as user
/// actions, so the session itself never sees a thread. Stopping the handle
/// (or dropping it) cancels the thread; at most one tick can already be in
/// flight in the channel at that point. Dropping the receiver also stops the
/// thread on its next send.
///
/// # Example
///
/// ```
/// use std::{sync::mpsc, time::Duration};
///
/// use digitforge_game::Ticker;
///
/// let (tx, rx) = mpsc::channel();
/// let mut ticker = Ticker::with_period(tx, (), Duration::from_millis(10));
/// rx.recv_timeout(Duration::from_secs(1)).unwrap();
/// ticker.stop();
/// ```
#[derive(Debug)]
pub struct Ticker {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Ticker {
    /// Spawns a ticker that sends `message` once per second.
    #[must_use]
    pub fn spawn<T>(sender: Sender<T>, message: T) -> Self
    where
        T: Clone + Send + 'static,
    {
        Self::with_period(sender, message, Duration::from_secs(1))
    }

    /// Spawns a ticker with a custom period.
    #[must_use]
    pub fn with_period<T>(sender: Sender<T>, message: T, period: Duration) -> Self
    where
        T: Clone + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || run(&sender, &message, period, &flag));
        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Stops the ticker and waits for its thread to exit.
    ///
    /// Idempotent; called automatically on drop.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run<T: Clone>(sender: &Sender<T>, message: &T, period: Duration, stop: &AtomicBool) {
    let mut next = Instant::now() + period;
    loop {
        while Instant::now() < next {
            if stop.load(Ordering::Relaxed) {
                return;
            }
            thread::sleep(POLL_INTERVAL.min(period));
        }
        if stop.load(Ordering::Relaxed) {
            return;
        }
        trace!("tick");
        if sender.send(message.clone()).is_err() {
            // Receiver is gone; the session was abandoned.
            return;
        }
        next += period;
    }
}
