//! Per-operation loading state.
//!
//! Each workflow run registers itself and receives a guard; the session is
//! "loading" while at least one run is still registered. Finished runs move
//! into a bounded history so callers can inspect how a specific run ended.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

const HISTORY_LIMIT: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Submission,
    Regeneration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationState {
    Running,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct OperationRecord {
    pub id: Uuid,
    pub kind: OperationKind,
    pub state: OperationState,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct TrackerInner {
    running: HashMap<Uuid, OperationRecord>,
    finished: VecDeque<OperationRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct OperationTracker {
    inner: Arc<Mutex<TrackerInner>>,
}

impl OperationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, kind: OperationKind) -> OperationGuard {
        let record = OperationRecord {
            id: Uuid::new_v4(),
            kind,
            state: OperationState::Running,
            started_at: Utc::now(),
            finished_at: None,
        };
        let id = record.id;
        self.inner.lock().running.insert(id, record);
        OperationGuard {
            tracker: self.clone(),
            id,
            finished: false,
        }
    }

    /// True while any tracked operation is in flight.
    pub fn is_busy(&self) -> bool {
        !self.inner.lock().running.is_empty()
    }

    pub fn in_flight(&self) -> Vec<OperationRecord> {
        let mut records: Vec<_> = self.inner.lock().running.values().cloned().collect();
        records.sort_by_key(|record| record.started_at);
        records
    }

    pub fn state(&self, id: &Uuid) -> Option<OperationState> {
        let inner = self.inner.lock();
        if let Some(record) = inner.running.get(id) {
            return Some(record.state.clone());
        }
        inner
            .finished
            .iter()
            .find(|record| &record.id == id)
            .map(|record| record.state.clone())
    }

    /// Most recently finished operations, newest first.
    pub fn recent(&self) -> Vec<OperationRecord> {
        self.inner.lock().finished.iter().rev().cloned().collect()
    }

    fn complete(&self, id: Uuid, state: OperationState) {
        let mut inner = self.inner.lock();
        let Some(mut record) = inner.running.remove(&id) else {
            return;
        };
        record.state = state;
        record.finished_at = Some(Utc::now());
        inner.finished.push_back(record);
        while inner.finished.len() > HISTORY_LIMIT {
            inner.finished.pop_front();
        }
    }
}

/// Marks its operation failed if dropped before `finish_ok`/`finish_err`.
#[derive(Debug)]
pub struct OperationGuard {
    tracker: OperationTracker,
    id: Uuid,
    finished: bool,
}

impl OperationGuard {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn finish_ok(mut self) {
        self.finished = true;
        self.tracker.complete(self.id, OperationState::Succeeded);
    }

    pub fn finish_err(mut self, message: impl Into<String>) {
        self.finished = true;
        self.tracker
            .complete(self.id, OperationState::Failed(message.into()));
    }
}

impl Drop for OperationGuard {
    fn drop(&mut self) {
        if !self.finished {
            self.tracker
                .complete(self.id, OperationState::Failed("abandoned".into()));
        }
    }
}
