//! Owner-scoped store traits.
//!
//! Every person and contact operation takes the owning user's id and only
//! ever sees rows belonging to that user. Absent rows are reported as
//! `Ok(None)` (or an empty `Vec`), never as an error; the caller decides
//! what "not found" means.
//!
//! Unique-index violations surface as [`ErrorKind::Conflict`] with one of
//! the messages in [`conflict`], so both backends report duplicates the
//! same way.
//!
//! [`ErrorKind::Conflict`]: contactbook_core::error::ErrorKind::Conflict

use async_trait::async_trait;
use uuid::Uuid;

use contactbook_core::result::AppResult;
use contactbook_core::types::PageRequest;
use contactbook_entity::contact::{Contact, ContactDraft};
use contactbook_entity::person::{Person, PersonDraft};
use contactbook_entity::user::{CreateUser, User};

/// Messages attached to conflict errors raised by the stores.
pub mod conflict {
    pub const ACCOUNT_EXISTS: &str = "Account already exists";
    pub const PERSON_EXISTS: &str = "Person already exists";
    pub const CONTACT_EMAIL_TAKEN: &str = "Contact with this email already exists";
    pub const CONTACT_PHONE_TAKEN: &str = "Contact with this phone already exists";
}

/// Account persistence.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    async fn update_avatar(&self, id: Uuid, avatar_url: &str) -> AppResult<Option<User>>;

    /// Store (or clear, with `None`) the user's current refresh token.
    async fn update_refresh_token(&self, id: Uuid, token: Option<&str>) -> AppResult<()>;
}

/// Address-book persons, scoped by owner.
#[async_trait]
pub trait PersonStore: Send + Sync + std::fmt::Debug + 'static {
    /// All of the owner's persons in creation order.
    async fn find_all(&self, user_id: Uuid) -> AppResult<Vec<Person>>;

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Person>>;

    async fn find_by_first_name(&self, user_id: Uuid, first_name: &str) -> AppResult<Vec<Person>>;

    async fn find_by_last_name(&self, user_id: Uuid, last_name: &str) -> AppResult<Vec<Person>>;

    async fn create(&self, user_id: Uuid, data: &PersonDraft) -> AppResult<Person>;

    async fn update(&self, user_id: Uuid, id: Uuid, data: &PersonDraft)
    -> AppResult<Option<Person>>;

    /// Delete a person together with its contacts.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Person>>;
}

/// Contacts, scoped by owner. Multi-row reads are in creation order.
#[async_trait]
pub trait ContactStore: Send + Sync + std::fmt::Debug + 'static {
    async fn find_all(&self, user_id: Uuid, page: &PageRequest) -> AppResult<Vec<Contact>>;

    /// Every contact of the owner, unpaginated.
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Contact>>;

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Contact>>;

    async fn find_by_email(&self, user_id: Uuid, email: &str) -> AppResult<Option<Contact>>;

    async fn find_all_by_email(&self, user_id: Uuid, email: &str) -> AppResult<Vec<Contact>>;

    async fn find_by_phone(&self, user_id: Uuid, phone: &str) -> AppResult<Option<Contact>>;

    async fn find_by_person(&self, user_id: Uuid, person_id: Uuid) -> AppResult<Vec<Contact>>;

    async fn create(&self, user_id: Uuid, data: &ContactDraft) -> AppResult<Contact>;

    /// Overwrite every mutable field. `None` when the contact is absent.
    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        data: &ContactDraft,
    ) -> AppResult<Option<Contact>>;

    async fn set_blocked(&self, user_id: Uuid, id: Uuid, blocked: bool)
    -> AppResult<Option<Contact>>;

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Contact>>;
}
