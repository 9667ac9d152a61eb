use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::app_core::DomainEvent;
use crate::domain::{SessionUser, WatchId};
use crate::ports::{AuthError, EventStorePort, SetOp, Subscription};
use quad_core::{Event, EventDraft, EventId, MembershipAction, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Store(#[from] crate::ports::StoreError),
}

/// Owns the live event-collection watch. At most one watch is active;
/// opening a new one cancels the previous. Snapshots are forwarded to the
/// kernel tagged with the watch id so deliveries from a cancelled watch can
/// be recognized and dropped.
pub struct EventWatcher<S> {
    store: Arc<S>,
    tx: mpsc::Sender<DomainEvent>,
    active: Option<(WatchId, Subscription)>,
}

impl<S: EventStorePort> EventWatcher<S> {
    pub fn new(store: Arc<S>, tx: mpsc::Sender<DomainEvent>) -> Self {
        Self {
            store,
            tx,
            active: None,
        }
    }

    pub fn open(&mut self) -> WatchId {
        self.close();
        let watch_id: WatchId = Uuid::new_v4();
        let tx = self.tx.clone();
        let subscription = self.store.watch_events(Box::new(move |events| {
            if tx
                .try_send(DomainEvent::WatchSnapshot { watch_id, events })
                .is_err()
            {
                tracing::warn!(%watch_id, "event channel full, dropping snapshot");
            }
        }));
        tracing::debug!(%watch_id, "event watch opened");
        self.active = Some((watch_id, subscription));
        watch_id
    }

    pub fn close(&mut self) {
        if let Some((watch_id, subscription)) = self.active.take() {
            subscription.cancel();
            tracing::debug!(%watch_id, "event watch cancelled");
        }
    }
}

/// Validates the draft and persists a new event with the caller as sole
/// initial participant. The store assigns the id and creation time; the
/// new event reaches subscribers through a later snapshot, never by local
/// insertion.
pub fn create_event<S: EventStorePort>(
    store: &S,
    draft: &EventDraft,
    session: Option<&SessionUser>,
) -> Result<EventId, RepoError> {
    let user = session.ok_or(AuthError::NotSignedIn)?;
    let record = draft
        .validated()?
        .into_record(user.user_id.clone(), user.email.clone());
    Ok(store.create_event(record)?)
}

/// Reads the current local membership flag and issues the one legal
/// transition as an atomic set operation. Never read-modify-writes the
/// participant array: two users joining concurrently must both land.
pub fn toggle_participation<S: EventStorePort>(
    store: &S,
    event: &Event,
    session: Option<&SessionUser>,
) -> Result<MembershipAction, RepoError> {
    let user = session.ok_or(AuthError::NotSignedIn)?;
    let action = quad_core::participation(event, &user.user_id).next_action();
    let op = match action {
        MembershipAction::Join => SetOp::Add(user.user_id.clone()),
        MembershipAction::Leave => SetOp::Remove(user.user_id.clone()),
    };
    store.update_participants(&event.id, op)?;
    Ok(action)
}
