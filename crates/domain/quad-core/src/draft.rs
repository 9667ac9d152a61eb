use serde::{Deserialize, Serialize};

use crate::event::{NewEventRecord, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftField {
    Title,
    Description,
    Date,
    Time,
    Location,
}

impl DraftField {
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Title => "Title",
            DraftField::Description => "Description",
            DraftField::Date => "Date",
            DraftField::Time => "Time",
            DraftField::Location => "Location",
        }
    }
}

impl std::fmt::Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} is required")]
pub struct ValidationError {
    pub field: DraftField,
}

/// Mutable new-event input. Never persisted; cleared on successful
/// submission, preserved on failure so retry needs no re-entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
}

impl EventDraft {
    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Title => self.title = value,
            DraftField::Description => self.description = value,
            DraftField::Date => self.date = value,
            DraftField::Time => self.time = value,
            DraftField::Location => self.location = value,
        }
    }

    pub fn clear(&mut self) {
        *self = EventDraft::default();
    }

    fn fields(&self) -> [(DraftField, &str); 5] {
        [
            (DraftField::Title, self.title.as_str()),
            (DraftField::Description, self.description.as_str()),
            (DraftField::Date, self.date.as_str()),
            (DraftField::Time, self.time.as_str()),
            (DraftField::Location, self.location.as_str()),
        ]
    }

    pub fn first_blank_field(&self) -> Option<DraftField> {
        self.fields()
            .into_iter()
            .find(|(_, v)| v.trim().is_empty())
            .map(|(f, _)| f)
    }

    /// Trims every field and rejects the draft if any is empty afterwards.
    pub fn validated(&self) -> Result<ValidatedDraft, ValidationError> {
        if let Some(field) = self.first_blank_field() {
            return Err(ValidationError { field });
        }
        Ok(ValidatedDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            location: self.location.trim().to_string(),
        })
    }
}

/// A draft that passed validation: all five fields trimmed and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
}

impl ValidatedDraft {
    /// Builds the creation record. The creator is the sole initial
    /// participant.
    pub fn into_record(self, creator_id: UserId, creator_email: String) -> NewEventRecord {
        NewEventRecord {
            title: self.title,
            description: self.description,
            date: self.date,
            time: self.time,
            location: self.location,
            participants: vec![creator_id.clone()],
            creator_id,
            creator_email,
        }
    }
}
