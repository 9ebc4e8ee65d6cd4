//! Fixtures shared by the service tests.

use chrono::NaiveDate;
use uuid::Uuid;

use contactbook_database::{MemoryStore, PersonStore};
use contactbook_entity::contact::ContactDraft;
use contactbook_entity::person::{Person, PersonDraft};

use crate::context::RequestContext;

pub fn context(username: &str) -> RequestContext {
    RequestContext::new(
        Uuid::now_v7(),
        username.to_string(),
        format!("{username}@example.com"),
    )
}

pub async fn seed_person(
    store: &MemoryStore,
    ctx: &RequestContext,
    first_name: &str,
    last_name: &str,
) -> Person {
    PersonStore::create(
        store,
        ctx.user_id,
        &PersonDraft {
            first_name: first_name.into(),
            last_name: last_name.into(),
        },
    )
    .await
    .unwrap()
}

pub fn draft(person_id: Uuid, email: &str, phone: &str) -> ContactDraft {
    ContactDraft {
        date_of_birth: NaiveDate::from_ymd_opt(1990, 6, 5).unwrap(),
        email: email.into(),
        phone: phone.into(),
        note: None,
        blocked: false,
        person_id,
    }
}
