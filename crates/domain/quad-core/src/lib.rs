pub mod draft;
pub mod event;
pub mod participation;

pub use draft::{DraftField, EventDraft, ValidatedDraft, ValidationError};
pub use event::{Event, EventId, NewEventRecord, UserId};
pub use participation::{participation, MembershipAction, Participation};
