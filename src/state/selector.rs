//! TimeBucketSelector - Shared Month Selection
//!
//! Single owner of the selected [`Month`]. Views hold a
//! [`BucketSubscription`] each; a change is committed to every subscription
//! inside [`TimeBucketSelector::select`], before any view reacts to it.

use tokio::sync::watch;
use tracing::info;

use crate::domain::month::Month;

/// Owner of the process-wide selected month
#[derive(Debug)]
pub struct TimeBucketSelector {
    tx: watch::Sender<Month>,
}

impl TimeBucketSelector {
    pub fn new(initial: Month) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// The currently selected month
    pub fn current_bucket(&self) -> Month {
        *self.tx.borrow()
    }

    /// Select `month`
    ///
    /// Returns `false` without notifying anyone when `month` is already
    /// selected.
    pub fn select(&self, month: Month) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == month {
                return false;
            }
            *current = month;
            true
        });

        if changed {
            info!(month = %month, subscribers = self.tx.receiver_count(), "Month selected");
        }
        changed
    }

    /// Subscribe to selection changes. The current value counts as seen.
    pub fn subscribe(&self) -> BucketSubscription {
        BucketSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for TimeBucketSelector {
    fn default() -> Self {
        Self::new(Month::default())
    }
}

/// A view's handle on the selected month
#[derive(Debug, Clone)]
pub struct BucketSubscription {
    rx: watch::Receiver<Month>,
}

impl BucketSubscription {
    /// The selected month, without marking it as seen
    pub fn current(&self) -> Month {
        *self.rx.borrow()
    }

    /// The new month if the selection changed since the last call
    pub fn take_change(&mut self) -> Option<Month> {
        // The selector outlives the views it feeds; a closed channel just
        // means no further changes.
        if self.rx.has_changed().unwrap_or(false) {
            Some(*self.rx.borrow_and_update())
        } else {
            None
        }
    }
}
