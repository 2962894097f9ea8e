//! Cancellable delayed execution

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Default quiet period
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Runs a task after a quiet period; scheduling again cancels the pending one.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` once `delay` has passed without another call to `schedule`
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .replace(handle);

        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Drop the pending task, if any. Returns true if one was still waiting.
    pub fn cancel(&self) -> bool {
        let pending = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        match pending {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn record(fired: Arc<Mutex<Vec<usize>>>, n: usize) -> impl Future<Output = ()> + Send + 'static {
        async move { fired.lock().unwrap().push(n) }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_schedule_fires() {
        let debouncer = Debouncer::default();
        let fired = Arc::new(Mutex::new(Vec::new()));

        debouncer.schedule(record(fired.clone(), 1));
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule(record(fired.clone(), 2));
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule(record(fired.clone(), 3));

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(*fired.lock().unwrap(), vec![3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_schedules_all_fire() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        let fired = Arc::new(Mutex::new(Vec::new()));

        debouncer.schedule(record(fired.clone(), 1));
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule(record(fired.clone(), 2));
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(*fired.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_fired_before_delay() {
        let debouncer = Debouncer::default();
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();

        debouncer.schedule(async move {
            c.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let debouncer = Debouncer::default();
        let fired = Arc::new(Mutex::new(Vec::new()));

        debouncer.schedule(record(fired.clone(), 1));
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(fired.lock().unwrap().is_empty());
    }
}
