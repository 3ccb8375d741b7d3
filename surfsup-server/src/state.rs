//! Application state shared across handlers

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;

use crate::db::Store;

/// Shared application state
///
/// Immutable after construction; handlers only read from it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Store,
    anchor_date: NaiveDate,
    start_time: Instant,
}

impl AppState {
    pub fn new(store: Store, anchor_date: NaiveDate) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                anchor_date,
                start_time: Instant::now(),
            }),
        }
    }

    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Last date of the dataset, used for the tobs window
    pub fn anchor_date(&self) -> NaiveDate {
        self.inner.anchor_date
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.inner.start_time.elapsed().as_secs()
    }
}
