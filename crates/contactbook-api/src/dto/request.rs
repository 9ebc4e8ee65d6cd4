//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use contactbook_entity::contact::ContactDraft;
use contactbook_entity::person::PersonDraft;

/// Sign-up request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Strength is checked by the password policy.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Create or replace a person.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PersonRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
}

impl From<PersonRequest> for PersonDraft {
    fn from(req: PersonRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

/// Create or replace a contact. Every mutable field is required.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactRequest {
    pub date_of_birth: NaiveDate,
    #[validate(email(message = "Invalid email address"), length(max = 100))]
    pub email: String,
    #[validate(length(min = 5, max = 20))]
    pub phone: String,
    #[validate(length(max = 500))]
    pub note: Option<String>,
    #[serde(default)]
    pub blocked: bool,
    pub person_id: Uuid,
}

impl From<ContactRequest> for ContactDraft {
    fn from(req: ContactRequest) -> Self {
        Self {
            date_of_birth: req.date_of_birth,
            email: req.email,
            phone: req.phone,
            note: req.note,
            blocked: req.blocked,
            person_id: req.person_id,
        }
    }
}

/// Body of `PATCH /contacts/{id}/blacklist`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BlacklistRequest {
    pub blocked: bool,
}

/// `?find=` query of the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub find: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(email: &str, phone: &str) -> ContactRequest {
        ContactRequest {
            date_of_birth: NaiveDate::from_ymd_opt(1990, 6, 5).unwrap(),
            email: email.into(),
            phone: phone.into(),
            note: None,
            blocked: false,
            person_id: Uuid::nil(),
        }
    }

    #[test]
    fn test_contact_rules() {
        assert!(contact("jon@example.com", "+380501112233").validate().is_ok());
        assert!(contact("not-an-email", "+380501112233").validate().is_err());
        assert!(contact("jon@example.com", "123").validate().is_err());

        let mut long_note = contact("jon@example.com", "+380501112233");
        long_note.note = Some("x".repeat(501));
        assert!(long_note.validate().is_err());
    }

    #[test]
    fn test_person_name_bounds() {
        let empty = PersonRequest { first_name: String::new(), last_name: "Doe".into() };
        assert!(empty.validate().is_err());
        let long = PersonRequest { first_name: "J".repeat(51), last_name: "Doe".into() };
        assert!(long.validate().is_err());
    }
}
