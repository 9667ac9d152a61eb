use crate::domain::{AppState, FeedState, FormPhase, FormState, Notice, SessionState};

use super::events::DomainEvent;
use quad_core::MembershipAction;

pub fn reduce(mut state: AppState, ev: DomainEvent) -> AppState {
    match ev {
        // Resolved by the kernel into SignedIn / SignedOut; nothing to do
        // if one reaches the reducer directly.
        DomainEvent::SessionChanged(_) => {}

        DomainEvent::SignedIn {
            epoch,
            user,
            watch_id,
        } => {
            state.session = SessionState::SignedIn { epoch, user };
            state.feed = FeedState::opening(watch_id);
            state.form = FormState::default();
            state.notice = None;
        }

        DomainEvent::SignedOut => {
            state.session = SessionState::SignedOut;
            state.feed = FeedState::idle();
            state.form = FormState::default();
            state.notice = None;
        }

        DomainEvent::WatchSnapshot { watch_id, events } => {
            if state.feed.watch_id == Some(watch_id) {
                state.feed.events = events;
                state.feed.loading = false;
            }
        }

        DomainEvent::FormToggled => {
            state.form.visible = !state.form.visible;
        }

        DomainEvent::DraftFieldSet(field, value) => {
            state.form.draft.set(field, value);
            if state.form.phase == FormPhase::Invalid {
                state.form.phase = FormPhase::Idle;
            }
        }

        DomainEvent::SubmitBlocked { field } => {
            state.form.phase = FormPhase::Invalid;
            state.notice = Some(Notice::error(format!("{} is required", field.label())));
        }

        DomainEvent::SubmitStarted => {
            state.form.phase = FormPhase::Submitting;
        }

        DomainEvent::CreateSucceeded { .. } => {
            state.form = FormState::default();
            state.notice = Some(Notice::success("Event created successfully!"));
        }

        DomainEvent::CreateFailed { message, .. } => {
            // Draft is preserved so the user can retry without re-entry.
            state.form.phase = FormPhase::Idle;
            state.notice = Some(Notice::error(format!("Failed to create event: {message}")));
        }

        DomainEvent::ToggleSucceeded { action, .. } => {
            state.notice = Some(Notice::success(match action {
                MembershipAction::Join => "You have joined the event!",
                MembershipAction::Leave => "You have left the event.",
            }));
        }

        DomainEvent::ToggleFailed { message, .. } => {
            state.notice = Some(Notice::error(format!(
                "Failed to update participation: {message}"
            )));
        }

        DomainEvent::NoticeDismissed => state.notice = None,

        DomainEvent::UserError(message) => {
            state.notice = Some(Notice::error(message));
        }
    }
    state
}
