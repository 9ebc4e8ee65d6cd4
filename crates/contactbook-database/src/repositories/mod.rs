//! PostgreSQL implementations of the store traits.

pub mod contact;
pub mod person;
pub mod user;

pub use contact::ContactRepository;
pub use person::PersonRepository;
pub use user::UserRepository;

/// Constraint and index names from `migrations/`, matched against
/// database errors to produce conflict and not-found errors.
pub(crate) mod constraint {
    pub const USERS_EMAIL_KEY: &str = "users_email_key";
    pub const USERS_EMAIL_LOWER_IDX: &str = "users_email_lower_idx";
    pub const PERSONS_NAME_KEY: &str = "persons_user_id_first_name_last_name_key";
    pub const CONTACTS_EMAIL_KEY: &str = "contacts_email_key";
    pub const CONTACTS_PHONE_KEY: &str = "contacts_phone_key";
    /// `(person_id, user_id)` → `persons (id, user_id)`.
    pub const CONTACTS_PERSON_FKEY: &str = "contacts_person_owner_fkey";
}

/// Name of the constraint a database error violated, if any.
fn violated_constraint(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint().map(str::to_owned),
        _ => None,
    }
}
