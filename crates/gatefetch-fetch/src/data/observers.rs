use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, warn};

use super::progress::ProgressEvent;

pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;
pub type ObserverResult = std::result::Result<(), ObserverError>;

/// Receives progress snapshots during a transfer.
///
/// Observers run synchronously on the fetching task, so they should return
/// quickly. A failing or panicking observer only loses its own updates.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent) -> ObserverResult;
}

impl<F> ProgressObserver for F
where
    F: Fn(&ProgressEvent) -> ObserverResult + Send + Sync,
{
    fn on_progress(&self, event: &ProgressEvent) -> ObserverResult { self(event) }
}

/// Ordered registry of progress observers with per-observer fault isolation.
///
/// # Examples
///
/// ```
/// use gatefetch_fetch::{ProgressEvent, ProgressObservers};
///
/// let observers = ProgressObservers::new()
///     .with(|event: &ProgressEvent| {
///         println!("{} {}", event.percent_complete, event.time_remaining);
///         Ok(())
///     })
///     .with(|_: &ProgressEvent| Err("renderer went away".into()));
///
/// assert_eq!(observers.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct ProgressObservers {
    observers: Vec<Arc<dyn ProgressObserver>>,
}

impl ProgressObservers {
    pub fn new() -> Self { Self::default() }

    /// Register a closure observer.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: Fn(&ProgressEvent) -> ObserverResult + Send + Sync + 'static,
    {
        self.observers.push(Arc::new(observer));
    }

    /// Register any [`ProgressObserver`] implementation.
    pub fn subscribe_observer(&mut self, observer: Arc<dyn ProgressObserver>) {
        self.observers.push(observer);
    }

    #[must_use]
    pub fn with<F>(mut self, observer: F) -> Self
    where
        F: Fn(&ProgressEvent) -> ObserverResult + Send + Sync + 'static,
    {
        self.subscribe(observer);
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.subscribe_observer(observer);
        self
    }

    pub fn len(&self) -> usize { self.observers.len() }

    pub fn is_empty(&self) -> bool { self.observers.is_empty() }

    /// Deliver `event` to every observer in registration order.
    pub fn notify(&self, event: &ProgressEvent) {
        for (index, observer) in self.observers.iter().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| observer.on_progress(event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => debug!(observer = index, error = %e, "progress observer failed"),
                Err(_) => warn!(observer = index, "progress observer panicked"),
            }
        }
    }
}

impl fmt::Debug for ProgressObservers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressObservers")
            .field("len", &self.observers.len())
            .finish()
    }
}
