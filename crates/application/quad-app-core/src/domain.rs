use uuid::Uuid;

use quad_core::{Event, EventDraft, UserId};

/// Identifies one open collection watch. Snapshots tagged with a stale id
/// are dropped by the kernel.
pub type WatchId = Uuid;

/// Identifies one signed-in span. Mutation callbacks tagged with a stale
/// epoch are dropped by the kernel.
pub type SessionEpoch = Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: UserId,
    pub email: String,
}

/// Authentication state as last reported by the provider. `Pending` holds
/// only until the provider's initial notification arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Pending,
    SignedOut,
    SignedIn {
        epoch: SessionEpoch,
        user: SessionUser,
    },
}

impl SessionState {
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            SessionState::SignedIn { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn epoch(&self) -> Option<SessionEpoch> {
        match self {
            SessionState::SignedIn { epoch, .. } => Some(*epoch),
            _ => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, SessionState::SignedIn { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    Events,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A dismissible user-facing notification. The kernel is the only producer;
/// lower layers never touch presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// The locally-observed event collection. Fully replaced on every snapshot;
/// never patched incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    pub watch_id: Option<WatchId>,
    /// True from watch open until the first snapshot arrives. Never reverts
    /// for the lifetime of that watch.
    pub loading: bool,
    pub events: Vec<Event>,
}

impl FeedState {
    pub fn idle() -> Self {
        Self {
            watch_id: None,
            loading: true,
            events: Vec::new(),
        }
    }

    pub fn opening(watch_id: WatchId) -> Self {
        Self {
            watch_id: Some(watch_id),
            loading: true,
            events: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    /// A submit was attempted with a blank required field.
    Invalid,
    Submitting,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub visible: bool,
    pub draft: EventDraft,
    pub phase: FormPhase,
}

impl FormState {
    pub fn in_flight(&self) -> bool {
        self.phase == FormPhase::Submitting
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub session: SessionState,
    pub feed: FeedState,
    pub form: FormState,
    pub notice: Option<Notice>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: SessionState::Pending,
            feed: FeedState::idle(),
            form: FormState::default(),
            notice: None,
        }
    }
}
