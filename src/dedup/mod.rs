
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
    time::{Duration, Instant},
};

use crate::config::C;

lazy_static! {
    /// Chat submissions seen by this process.
    pub static ref CHAT_SUBMISSIONS: DuplicateGuard =
        DuplicateGuard::new(Duration::from_secs(C.chat.dedup_window_secs));
}

/// Time-windowed set of client-supplied message ids.
///
/// Entries are only swept when a new id is checked, so memory grows with
/// traffic inside one window. State is local to this process: two instances
/// behind a load balancer will both forward the same id.
#[derive(Debug)]
pub struct DuplicateGuard {
    window: Duration,
    seen: Mutex<HashMap<String, Instant>>,
}

impl DuplicateGuard {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            seen: Mutex::new(HashMap::new()),
        }
    }

    /// Returns `true` if `id` was already submitted inside the window.
    /// Otherwise records it and returns `false`.
    pub fn check_and_record(&self, id: &str) -> bool {
        self.check_and_record_at(id, Instant::now())
    }

    /// Same as `check_and_record`, with the clock given by caller.
    pub fn check_and_record_at(&self, id: &str, now: Instant) -> bool {
        let mut seen = self.lock();
        let window = self.window;
        seen.retain(|_, submitted_at| now.saturating_duration_since(*submitted_at) < window);

        if seen.contains_key(id) {
            return true;
        }
        seen.insert(id.to_string(), now);
        false
    }

    /// Ids currently remembered (swept lazily).
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Instant>> {
        // A panic while holding the lock leaves the map usable.
        self.seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
