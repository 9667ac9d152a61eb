use crate::domain::Route;
use quad_core::{DraftField, EventId};

#[derive(Debug, Clone)]
pub enum AppCommand {
    // Session
    SignOut,

    // Navigation
    Navigate(Route),

    // Form lifecycle
    ToggleForm,
    SetDraftField(DraftField, String),
    SubmitEvent,

    // Membership
    ToggleParticipation(EventId),

    // Notices
    DismissNotice,
}
