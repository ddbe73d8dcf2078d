use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

/// Stored ids further ahead of the clock than this are not treated as
/// timestamps when seeding.
const MAX_FLOOR_LEAD_MS: u64 = 24 * 60 * 60 * 1000;

/// Issues profile ids from epoch milliseconds, strictly increasing even when
/// the clock stalls or steps backwards.
#[derive(Debug, Default)]
pub struct ProfileIdGenerator {
    last: AtomicU64,
}

impl ProfileIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts issuing above `floor`, typically the largest id already stored.
    /// A floor more than a day ahead of the clock is ignored.
    pub fn after(floor: Option<u64>) -> Self {
        let horizon = now_millis().saturating_add(MAX_FLOOR_LEAD_MS);
        let floor = match floor {
            Some(floor) if floor > horizon => {
                warn!(floor, "Ignoring stored id far ahead of the clock when seeding ids");
                0
            }
            other => other.unwrap_or(0),
        };
        Self {
            last: AtomicU64::new(floor),
        }
    }

    pub fn next_id(&self) -> String {
        self.next_value().to_string()
    }

    fn next_value(&self) -> u64 {
        let now = now_millis();
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(current.saturating_add(1));
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(observed) => current = observed,
            }
        }
    }
}

fn now_millis() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}
