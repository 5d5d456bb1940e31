//! Uniform loading/error/success signaling around store actions.
//!
//! Every store action runs through [`Dispatcher::run`]. The dispatcher keeps
//! an in-flight counter for loading indicators, logs failures and turns each
//! failure into exactly one error [`Notification`]. Success toasts are not
//! automatic: a store calls [`Dispatcher::show_success`] on the happy path of
//! a mutating action.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tmb_admin::dispatch::{Dispatcher, MemoryNotifier, Severity};
//!
//! let notifier = MemoryNotifier::new();
//! let dispatcher = Dispatcher::new(Arc::new(notifier.clone()));
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let value = rt.block_on(dispatcher.run("answer", async { Ok(42) })).unwrap();
//! assert_eq!(value, 42);
//! assert_eq!(notifier.count(Severity::Error), 0);
//! ```

mod notifier;

pub use notifier::{MemoryNotifier, Notification, Notifier, Severity, TracingNotifier};

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::Result;

/// Title used for every failure notification.
pub const ERROR_TITLE: &str = "Error";

/// Wraps asynchronous store actions.
#[derive(Debug)]
pub struct Dispatcher {
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicUsize,
}

impl Dispatcher {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Run an action.
    ///
    /// The result is handed back unchanged. On failure one error notification
    /// is sent before the error is returned to the caller.
    pub async fn run<T, F>(&self, action: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let _loading = InFlight::enter(&self.in_flight);
        tracing::debug!(name: "action.started", action, "Action started");

        match fut.await {
            Ok(value) => {
                tracing::debug!(name: "action.completed", action, "Action completed");
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(
                    name: "action.failed",
                    action,
                    status = e.status(),
                    error = %e,
                    "Action failed"
                );
                self.notifier
                    .notify(Notification::error(ERROR_TITLE, e.user_message()));
                Err(e)
            }
        }
    }

    /// Emit a success toast.
    pub fn show_success(&self, title: &str, message: &str) {
        self.notifier.notify(Notification::success(title, message));
    }

    /// Whether any action is currently running.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Number of actions currently running.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Decrements the in-flight counter when dropped, including when the action
/// future itself is dropped before completing.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn dispatcher() -> (Dispatcher, MemoryNotifier) {
        let notifier = MemoryNotifier::new();
        (Dispatcher::new(Arc::new(notifier.clone())), notifier)
    }

    #[tokio::test]
    async fn test_success_passes_value_through_silently() {
        let (dispatcher, notifier) = dispatcher();
        let value = dispatcher.run("ok", async { Ok("done") }).await.unwrap();
        assert_eq!(value, "done");
        assert!(notifier.snapshot().is_empty());
        assert!(!dispatcher.is_loading());
    }

    #[tokio::test]
    async fn test_failure_notifies_once_and_rethrows() {
        let (dispatcher, notifier) = dispatcher();
        let result: Result<()> = dispatcher
            .run("fail", async {
                Err(Error::Api {
                    status: 422,
                    message: "Name is required".to_string(),
                })
            })
            .await;

        assert!(matches!(result, Err(Error::Api { status: 422, .. })));
        let notes = notifier.drain();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0], Notification::error("Error", "Name is required"));
    }

    #[tokio::test]
    async fn test_loading_while_running() {
        let (dispatcher, _) = dispatcher();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let dispatcher = Arc::new(dispatcher);
        let task = {
            let dispatcher = Arc::clone(&dispatcher);
            tokio::spawn(async move {
                dispatcher
                    .run("wait", async move {
                        rx.await.ok();
                        Ok(())
                    })
                    .await
            })
        };

        while !dispatcher.is_loading() {
            tokio::task::yield_now().await;
        }
        assert_eq!(dispatcher.in_flight(), 1);

        tx.send(()).unwrap();
        task.await.unwrap().unwrap();
        assert!(!dispatcher.is_loading());
    }

    #[tokio::test]
    async fn test_tracing_notifier_still_rethrows() {
        let dispatcher = Dispatcher::new(Arc::new(TracingNotifier));
        let result: Result<()> = dispatcher.run("fail", async { Err(Error::MissingToken) }).await;
        assert!(matches!(result, Err(Error::MissingToken)));
        dispatcher.show_success("Saved", "Saved successfully");
    }

    #[tokio::test]
    async fn test_dropped_action_clears_loading() {
        let (dispatcher, _) = dispatcher();
        {
            let fut = dispatcher.run("pending", std::future::pending::<Result<()>>());
            let _ = tokio::time::timeout(std::time::Duration::from_millis(5), fut).await;
        }
        assert!(!dispatcher.is_loading());
    }
}
