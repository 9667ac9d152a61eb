use serde::{Deserialize, Serialize};

pub type UserId = String;
pub type EventId = String;

/// One gathering as observed in a collection snapshot. Created once, then
/// mutated only through membership set operations; never edited in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub creator_id: UserId,
    pub creator_email: String,
    pub participants: Vec<UserId>,
    /// Store-assigned millisecond timestamp; the descending sort key.
    pub created_at: i64,
}

impl Event {
    pub fn is_participant(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p == user_id)
    }

    pub fn is_creator(&self, user_id: &str) -> bool {
        self.creator_id == user_id
    }
}

/// Fields handed to the store at creation. The store assigns `id` and
/// `created_at`; everything else is fixed by the caller, including the
/// initial participant list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewEventRecord {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub creator_id: UserId,
    pub creator_email: String,
    pub participants: Vec<UserId>,
}
