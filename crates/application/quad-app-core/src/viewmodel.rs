use crate::domain::{AppState, FormPhase};
use quad_core::{participation, DraftField, EventDraft, EventId, Participation};

#[derive(Debug, Clone)]
pub struct EventCardVm {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub host_email: String,
    pub participant_count: usize,
    pub is_participant: bool,
    pub is_creator: bool,
    pub action_label: &'static str,
}

#[derive(Debug, Clone)]
pub struct EventListVm {
    pub is_loading: bool,
    pub is_empty: bool,
    pub cards: Vec<EventCardVm>,
}

/// Derives the list screen from the latest snapshot. Recomputed whole on
/// every call; per-card flags are never carried over from an earlier
/// snapshot.
pub fn event_list_vm(state: &AppState) -> EventListVm {
    let viewer = state.session.user();
    let cards = state
        .feed
        .events
        .iter()
        .map(|event| {
            let p = viewer
                .map(|u| participation(event, &u.user_id))
                .unwrap_or(Participation {
                    is_participant: false,
                    is_creator: false,
                });
            EventCardVm {
                id: event.id.clone(),
                title: event.title.clone(),
                description: event.description.clone(),
                date: event.date.clone(),
                time: event.time.clone(),
                location: event.location.clone(),
                host_email: event.creator_email.clone(),
                participant_count: event.participants.len(),
                is_participant: p.is_participant,
                is_creator: p.is_creator,
                action_label: p.next_action().label(),
            }
        })
        .collect();

    EventListVm {
        is_loading: state.feed.loading,
        is_empty: !state.feed.loading && state.feed.events.is_empty(),
        cards,
    }
}

#[derive(Debug, Clone)]
pub struct EventFormVm {
    pub visible: bool,
    pub draft: EventDraft,
    pub in_flight: bool,
    pub title_error: Option<String>,
    pub description_error: Option<String>,
    pub date_error: Option<String>,
    pub time_error: Option<String>,
    pub location_error: Option<String>,
    pub can_submit: bool,
}

fn field_error(state: &AppState, field: DraftField, value: &str) -> Option<String> {
    if state.form.phase == FormPhase::Invalid && value.trim().is_empty() {
        Some(format!("{} is required", field.label()))
    } else {
        None
    }
}

pub fn event_form_vm(state: &AppState) -> EventFormVm {
    let draft = state.form.draft.clone();
    EventFormVm {
        visible: state.form.visible,
        in_flight: state.form.in_flight(),
        title_error: field_error(state, DraftField::Title, &draft.title),
        description_error: field_error(state, DraftField::Description, &draft.description),
        date_error: field_error(state, DraftField::Date, &draft.date),
        time_error: field_error(state, DraftField::Time, &draft.time),
        location_error: field_error(state, DraftField::Location, &draft.location),
        can_submit: !state.form.in_flight(),
        draft,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeedState, SessionState, SessionUser};
    use quad_core::Event;
    use uuid::Uuid;

    fn event(id: &str, participants: &[&str], created_at: i64) -> Event {
        Event {
            id: id.into(),
            title: "Study Group".into(),
            description: "desc".into(),
            date: "May 1".into(),
            time: "5pm".into(),
            location: "Lib 201".into(),
            creator_id: "u1".into(),
            creator_email: "a@campus.edu".into(),
            participants: participants.iter().map(|p| p.to_string()).collect(),
            created_at,
        }
    }

    fn signed_in_state(user_id: &str) -> AppState {
        AppState {
            session: SessionState::SignedIn {
                epoch: Uuid::new_v4(),
                user: SessionUser {
                    user_id: user_id.into(),
                    email: format!("{user_id}@campus.edu"),
                },
            },
            ..Default::default()
        }
    }

    #[test]
    fn loading_until_first_snapshot_then_empty() {
        let mut state = signed_in_state("u1");
        state.feed = FeedState::opening(Uuid::new_v4());

        let vm = event_list_vm(&state);
        assert!(vm.is_loading);
        assert!(!vm.is_empty);

        state.feed.loading = false;
        let vm = event_list_vm(&state);
        assert!(!vm.is_loading);
        assert!(vm.is_empty);
    }

    #[test]
    fn card_flags_follow_the_latest_snapshot() {
        let mut state = signed_in_state("u2");
        state.feed.loading = false;
        state.feed.events = vec![event("e1", &["u1", "u2"], 1)];

        let vm = event_list_vm(&state);
        assert!(vm.cards[0].is_participant);
        assert_eq!(vm.cards[0].action_label, "Leave Event");

        // Removed by another client: the very next snapshot must flip the
        // derived flags.
        state.feed.events = vec![event("e1", &["u1"], 1)];
        let vm = event_list_vm(&state);
        assert!(!vm.cards[0].is_participant);
        assert_eq!(vm.cards[0].action_label, "Join Event");
        assert_eq!(vm.cards[0].participant_count, 1);
    }

    #[test]
    fn creator_badge_only_for_the_creator() {
        let mut state = signed_in_state("u1");
        state.feed.loading = false;
        state.feed.events = vec![event("e1", &["u1"], 1)];
        assert!(event_list_vm(&state).cards[0].is_creator);

        let mut state = signed_in_state("u2");
        state.feed.loading = false;
        state.feed.events = vec![event("e1", &["u1"], 1)];
        assert!(!event_list_vm(&state).cards[0].is_creator);
    }

    #[test]
    fn field_errors_appear_only_after_a_blocked_submit() {
        let mut state = signed_in_state("u1");
        state.form.draft.title = "Study Group".into();

        let vm = event_form_vm(&state);
        assert!(vm.date_error.is_none());

        state.form.phase = FormPhase::Invalid;
        let vm = event_form_vm(&state);
        assert!(vm.title_error.is_none());
        assert_eq!(vm.date_error.as_deref(), Some("Date is required"));
        assert_eq!(vm.location_error.as_deref(), Some("Location is required"));
    }

    #[test]
    fn submission_in_flight_blocks_resubmit() {
        let mut state = signed_in_state("u1");
        state.form.phase = FormPhase::Submitting;
        let vm = event_form_vm(&state);
        assert!(vm.in_flight);
        assert!(!vm.can_submit);
    }
}
