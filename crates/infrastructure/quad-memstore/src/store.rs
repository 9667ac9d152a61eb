use std::sync::{Arc, Mutex};

use uuid::Uuid;

use quad_app_core::ports::{EventStorePort, SetOp, SnapshotCallback, StoreError, Subscription};
use quad_core::{Event, EventId, NewEventRecord};

type SharedSnapshotCallback = Arc<dyn Fn(Vec<Event>) + Send + Sync>;

struct StoreInner {
    /// Newest first; inserts keep it ordered because `created_at` is
    /// strictly monotonic.
    events: Vec<Event>,
    clock_ms: i64,
    next_watcher_id: u64,
    watchers: Vec<(u64, SharedSnapshotCallback)>,
}

impl StoreInner {
    /// Assigns creation times: wall-clock milliseconds, bumped so two
    /// writes in the same millisecond still order totally.
    fn next_timestamp(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        self.clock_ms = now.max(self.clock_ms + 1);
        self.clock_ms
    }

    /// Invoked with the lock held so snapshots reach every watcher in emit
    /// order. Watcher callbacks must not call back into the store.
    fn notify_watchers(&self) {
        let snapshot = self.events.clone();
        for (_, watcher) in &self.watchers {
            watcher(snapshot.clone());
        }
    }
}

/// In-process event collection with live full-snapshot watchers. Every
/// mutation runs under one lock, which is what makes the participant set
/// operations atomic under concurrent writers. Clones share the collection.
#[derive(Clone)]
pub struct MemoryEventStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl Default for MemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                events: Vec::new(),
                clock_ms: 0,
                next_watcher_id: 0,
                watchers: Vec::new(),
            })),
        }
    }
}

impl EventStorePort for MemoryEventStore {
    fn watch_events(&self, on_snapshot: SnapshotCallback) -> Subscription {
        let on_snapshot: SharedSnapshotCallback = Arc::from(on_snapshot);
        let watcher_id;
        {
            let mut inner = self.inner.lock().unwrap();
            watcher_id = inner.next_watcher_id;
            inner.next_watcher_id += 1;
            inner.watchers.push((watcher_id, on_snapshot.clone()));
            // Initial delivery: the current matching set, as one unit.
            on_snapshot(inner.events.clone());
        }
        tracing::debug!(watcher_id, "snapshot watcher registered");

        let inner = self.inner.clone();
        Subscription::new(move || {
            let mut inner = inner.lock().unwrap();
            inner.watchers.retain(|(id, _)| *id != watcher_id);
            tracing::debug!(watcher_id, "snapshot watcher removed");
        })
    }

    fn create_event(&self, record: NewEventRecord) -> Result<EventId, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let id: EventId = Uuid::new_v4().to_string();
        let created_at = inner.next_timestamp();
        let event = Event {
            id: id.clone(),
            title: record.title,
            description: record.description,
            date: record.date,
            time: record.time,
            location: record.location,
            creator_id: record.creator_id,
            creator_email: record.creator_email,
            participants: record.participants,
            created_at,
        };
        inner.events.insert(0, event);
        inner.notify_watchers();
        Ok(id)
    }

    fn update_participants(&self, event_id: &EventId, op: SetOp) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(ix) = inner.events.iter().position(|e| &e.id == event_id) else {
            return Err(StoreError::NotFound(event_id.clone()));
        };

        let participants = &mut inner.events[ix].participants;
        let changed = match op {
            SetOp::Add(user_id) => {
                if participants.iter().any(|p| p == &user_id) {
                    false
                } else {
                    participants.push(user_id);
                    true
                }
            }
            SetOp::Remove(user_id) => {
                let before = participants.len();
                participants.retain(|p| p != &user_id);
                participants.len() != before
            }
        };

        // A no-op set operation leaves the document untouched and emits no
        // snapshot.
        if changed {
            inner.notify_watchers();
        }
        Ok(())
    }
}
