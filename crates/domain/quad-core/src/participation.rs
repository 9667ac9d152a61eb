use crate::event::Event;

/// The two membership transitions. Each is idempotent at the store: a
/// set-add of a present member and a set-remove of an absent one are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipAction {
    Join,
    Leave,
}

impl MembershipAction {
    pub fn label(&self) -> &'static str {
        match self {
            MembershipAction::Join => "Join Event",
            MembershipAction::Leave => "Leave Event",
        }
    }
}

/// Per-(event, user) membership derivation. Pure; recomputed from scratch
/// on every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participation {
    pub is_participant: bool,
    pub is_creator: bool,
}

impl Participation {
    /// Exactly one transition is legal at any time: `Join` when not a
    /// member, `Leave` when a member.
    pub fn next_action(&self) -> MembershipAction {
        if self.is_participant {
            MembershipAction::Leave
        } else {
            MembershipAction::Join
        }
    }
}

pub fn participation(event: &Event, user_id: &str) -> Participation {
    Participation {
        is_participant: event.is_participant(user_id),
        is_creator: event.is_creator(user_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(participants: &[&str]) -> Event {
        Event {
            id: "e1".into(),
            title: "Study Group".into(),
            description: "desc".into(),
            date: "May 1".into(),
            time: "5pm".into(),
            location: "Lib 201".into(),
            creator_id: "u1".into(),
            creator_email: "a@campus.edu".into(),
            participants: participants.iter().map(|p| p.to_string()).collect(),
            created_at: 1,
        }
    }

    #[test]
    fn non_member_may_only_join() {
        let p = participation(&event(&["u1"]), "u2");
        assert!(!p.is_participant);
        assert!(!p.is_creator);
        assert_eq!(p.next_action(), MembershipAction::Join);
    }

    #[test]
    fn member_may_only_leave() {
        let p = participation(&event(&["u1", "u2"]), "u2");
        assert!(p.is_participant);
        assert_eq!(p.next_action(), MembershipAction::Leave);
    }

    #[test]
    fn creator_who_left_is_still_the_creator() {
        // The source behavior: a creator may leave their own event, which
        // keeps creator_id/creator_email on a creator-less event.
        let p = participation(&event(&["u2"]), "u1");
        assert!(p.is_creator);
        assert!(!p.is_participant);
        assert_eq!(p.next_action(), MembershipAction::Join);
    }
}
