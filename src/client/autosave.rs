/**
 * Debounced Autosave
 *
 * Edits are saved automatically, but not on every keystroke: each
 * change (re)schedules a save a fixed delay into the future, so a burst
 * of edits collapses into one push of the latest snapshot. Scheduling
 * while a save is pending cancels the pending one.
 *
 * The save outcome is observable through a watch channel so the UI can
 * show "saving…" / "saved" / "save failed" states; failures are
 * reported, never swallowed.
 */

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Delay between the last edit and the save it triggers
pub const AUTOSAVE_DELAY: Duration = Duration::from_millis(800);

/// Observable state of the autosave pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    /// Nothing scheduled and nothing to report
    Idle,
    /// An edit is waiting out the debounce delay
    Pending,
    /// The most recent save succeeded
    Saved,
    /// The most recent save failed; the message is displayable
    Failed(String),
}

/// Debounced, cancellable save scheduler
pub struct Autosaver {
    delay: Duration,
    status_tx: watch::Sender<SaveStatus>,
    pending: Option<JoinHandle<()>>,
}

impl Autosaver {
    pub fn new() -> Self {
        Self::with_delay(AUTOSAVE_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        let (status_tx, _) = watch::channel(SaveStatus::Idle);
        Autosaver {
            delay,
            status_tx,
            pending: None,
        }
    }

    /// Subscribe to save status changes
    pub fn status(&self) -> watch::Receiver<SaveStatus> {
        self.status_tx.subscribe()
    }

    /// Schedule `save` to run after the debounce delay
    ///
    /// Cancels any not-yet-fired save; the newest snapshot always wins.
    pub fn schedule<F, Fut, E>(&mut self, save: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: std::fmt::Display + Send + 'static,
    {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let _ = self.status_tx.send(SaveStatus::Pending);

        let delay = self.delay;
        let status_tx = self.status_tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let status = match save().await {
                Ok(()) => SaveStatus::Saved,
                Err(e) => {
                    tracing::warn!("Autosave failed: {}", e);
                    SaveStatus::Failed(e.to_string())
                }
            };
            let _ = status_tx.send(status);
        }));
    }

    /// Cancel any pending save without running it
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
            let _ = self.status_tx.send(SaveStatus::Idle);
        }
    }
}

impl Default for Autosaver {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn wait_for(rx: &mut watch::Receiver<SaveStatus>, want: SaveStatus) {
        loop {
            if *rx.borrow() == want {
                return;
            }
            rx.changed().await.unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_runs_after_delay() {
        let mut autosaver = Autosaver::new();
        let mut status = autosaver.status();
        let saves = Arc::new(AtomicUsize::new(0));

        let counter = saves.clone();
        autosaver.schedule(move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<(), std::io::Error>(())
        });
        assert_eq!(*status.borrow(), SaveStatus::Pending);

        wait_for(&mut status, SaveStatus::Saved).await;
        assert_eq!(saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_cancels_previous() {
        let mut autosaver = Autosaver::new();
        let mut status = autosaver.status();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let counter = first.clone();
        autosaver.schedule(move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<(), std::io::Error>(())
        });

        let counter = second.clone();
        autosaver.schedule(move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<(), std::io::Error>(())
        });

        wait_for(&mut status, SaveStatus::Saved).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_reported() {
        let mut autosaver = Autosaver::new();
        let mut status = autosaver.status();

        autosaver.schedule(move || async move {
            Err::<(), _>(std::io::Error::other("connection refused"))
        });

        loop {
            status.changed().await.unwrap();
            if let SaveStatus::Failed(message) = &*status.borrow() {
                assert!(message.contains("connection refused"));
                break;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_save() {
        let mut autosaver = Autosaver::new();
        let saves = Arc::new(AtomicUsize::new(0));

        let counter = saves.clone();
        autosaver.schedule(move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<(), std::io::Error>(())
        });
        autosaver.cancel();
        assert_eq!(*autosaver.status().borrow(), SaveStatus::Idle);

        tokio::time::sleep(AUTOSAVE_DELAY * 2).await;
        assert_eq!(saves.load(Ordering::SeqCst), 0);
    }
}
