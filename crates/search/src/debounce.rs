use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use flume::{Receiver, Sender, unbounded};
use parking_lot::Mutex;
use smol::{Task, Timer};

pub const DEFAULT_DEBOUNCE_MS: u64 = 250;
/// Longest quiet period a config file may ask for.
pub const MAX_DEBOUNCE_MS: u64 = 5_000;

/// Delays delivery of a value until input has been quiet for `delay`.
///
/// At most one timer is pending. Scheduling a new value cancels the previous
/// timer, so only the latest value is ever delivered on the receiver.
pub struct Debouncer<T> {
    delay: Duration,
    generation: Arc<AtomicU64>,
    pending: Mutex<Option<Task<()>>>,
    sender: Sender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> (Self, Receiver<T>) {
        let (sender, receiver) = unbounded();
        let debouncer = Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
            sender,
        };
        (debouncer, receiver)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Restart the quiet period with `value` as the value to deliver.
    pub fn schedule(&self, value: T) {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let sender = self.sender.clone();
        let delay = self.delay;

        let task = smol::spawn(async move {
            Timer::after(delay).await;
            // The timer may have fired just as it was replaced.
            if generation.load(Ordering::SeqCst) == token {
                let _ = sender.send(value);
            }
        });

        // Dropping the previous task cancels it.
        *self.pending.lock() = Some(task);
    }

    /// Drop any pending delivery.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.pending.lock().take();
    }

    /// Whether a timer is armed and has not delivered yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}
