use crate::domain::{Route, SessionUser};
use quad_core::{Event, EventId, NewEventRecord, UserId};

pub type SessionCallback = Box<dyn Fn(Option<SessionUser>) + Send + Sync>;
pub type SnapshotCallback = Box<dyn Fn(Vec<Event>) + Send + Sync>;

/// Handle for an open observation. Cancelling is idempotent; dropping the
/// handle cancels too, so a watch can never outlive its owner.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no active session")]
    NotSignedIn,
    #[error("auth provider failure: {0}")]
    Provider(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(EventId),
    #[error("permission denied")]
    PermissionDenied,
    #[error("write failed: {0}")]
    WriteFailed(String),
}

/// Atomic membership set operation. The store applies it without the caller
/// reading the current value first, so concurrent writers cannot lose each
/// other's updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOp {
    Add(UserId),
    Remove(UserId),
}

/// Session observation and sign-out. `observe_session` must deliver the
/// current state immediately on subscribe, then once per change.
pub trait AuthPort: Send + Sync + 'static {
    fn observe_session(&self, on_change: SessionCallback) -> Subscription;
    fn sign_out(&self) -> Result<(), AuthError>;
}

/// The event collection contract. `watch_events` delivers one full snapshot,
/// ordered by creation time descending, on subscribe and per change; each
/// snapshot supersedes the previous one entirely.
pub trait EventStorePort: Send + Sync + 'static {
    fn watch_events(&self, on_snapshot: SnapshotCallback) -> Subscription;
    fn create_event(&self, record: NewEventRecord) -> Result<EventId, StoreError>;
    fn update_participants(&self, event_id: &EventId, op: SetOp) -> Result<(), StoreError>;
}

/// Fire-and-forget navigation transitions.
pub trait NavigatorPort: Send + Sync + 'static {
    fn replace(&self, route: Route);
    fn push(&self, route: Route);
}
