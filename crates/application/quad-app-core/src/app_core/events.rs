use crate::domain::{SessionEpoch, SessionUser, WatchId};
use quad_core::{DraftField, Event, MembershipAction};

#[derive(Debug, Clone)]
pub enum DomainEvent {
    /// Raw provider notification. The kernel resolves it into `SignedIn` /
    /// `SignedOut` (attaching epoch and watch id) before the reducer runs.
    SessionChanged(Option<SessionUser>),
    SignedIn {
        epoch: SessionEpoch,
        user: SessionUser,
        watch_id: WatchId,
    },
    SignedOut,

    // Event feed
    WatchSnapshot {
        watch_id: WatchId,
        events: Vec<Event>,
    },

    // Form lifecycle
    FormToggled,
    DraftFieldSet(DraftField, String),
    SubmitBlocked {
        field: DraftField,
    },
    SubmitStarted,
    CreateSucceeded {
        epoch: SessionEpoch,
    },
    CreateFailed {
        epoch: SessionEpoch,
        message: String,
    },

    // Membership toggles
    ToggleSucceeded {
        epoch: SessionEpoch,
        action: MembershipAction,
    },
    ToggleFailed {
        epoch: SessionEpoch,
        message: String,
    },

    // User-visible notices
    NoticeDismissed,
    UserError(String),
}
