//! Contact entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A reachable identity record attached to a person.
///
/// `email` and `phone` are unique across all contacts, regardless of owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub id: Uuid,
    /// Owning user. Never changes after creation.
    pub user_id: Uuid,
    /// The person this contact belongs to.
    pub person_id: Uuid,
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub phone: String,
    pub note: Option<String>,
    /// Application-level blacklist marker.
    pub blocked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Overwrite every mutable field with the values in `draft`.
    pub fn apply(&mut self, draft: &ContactDraft, now: DateTime<Utc>) {
        self.date_of_birth = draft.date_of_birth;
        self.email = draft.email.clone();
        self.phone = draft.phone.clone();
        self.note = draft.note.clone();
        self.blocked = draft.blocked;
        self.person_id = draft.person_id;
        self.updated_at = now;
    }

    /// The mutable fields of this contact, as a draft.
    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            date_of_birth: self.date_of_birth,
            email: self.email.clone(),
            phone: self.phone.clone(),
            note: self.note.clone(),
            blocked: self.blocked,
            person_id: self.person_id,
        }
    }
}

/// A fully populated set of mutable contact fields, used for both
/// creation and replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub phone: String,
    pub note: Option<String>,
    #[serde(default)]
    pub blocked: bool,
    pub person_id: Uuid,
}
