//! Owner-scoped contact CRUD.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use contactbook_core::error::AppError;
use contactbook_core::types::PageRequest;
use contactbook_database::{ContactStore, PersonStore};
use contactbook_entity::contact::{Contact, ContactDraft};

use crate::context::RequestContext;

/// Reads and writes the acting user's contacts.
///
/// Lookups return `Ok(None)` for rows that are absent or belong to someone
/// else; mutations on an absent contact are no-ops that also return `None`.
#[derive(Debug, Clone)]
pub struct ContactService {
    contacts: Arc<dyn ContactStore>,
    persons: Arc<dyn PersonStore>,
}

impl ContactService {
    pub fn new(contacts: Arc<dyn ContactStore>, persons: Arc<dyn PersonStore>) -> Self {
        Self { contacts, persons }
    }

    /// Contacts in creation order, one page at a time.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<Vec<Contact>, AppError> {
        self.contacts.find_all(ctx.user_id, &page).await
    }

    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Option<Contact>, AppError> {
        self.contacts.find_by_id(ctx.user_id, id).await
    }

    pub async fn get_by_email(
        &self,
        ctx: &RequestContext,
        email: &str,
    ) -> Result<Option<Contact>, AppError> {
        self.contacts.find_by_email(ctx.user_id, email).await
    }

    pub async fn get_by_phone(
        &self,
        ctx: &RequestContext,
        phone: &str,
    ) -> Result<Option<Contact>, AppError> {
        self.contacts.find_by_phone(ctx.user_id, phone).await
    }

    /// Contacts attached to one of the user's persons.
    pub async fn list_by_person(
        &self,
        ctx: &RequestContext,
        person_id: Uuid,
    ) -> Result<Vec<Contact>, AppError> {
        self.require_person(ctx, person_id).await?;
        self.contacts.find_by_person(ctx.user_id, person_id).await
    }

    /// Create a contact for one of the user's persons.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        draft: &ContactDraft,
    ) -> Result<Contact, AppError> {
        self.require_person(ctx, draft.person_id).await?;
        let contact = self.contacts.create(ctx.user_id, draft).await?;

        info!(user_id = %ctx.user_id, contact_id = %contact.id, "Contact created");
        Ok(contact)
    }

    /// Replace every mutable field of a contact.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, AppError> {
        if self.contacts.find_by_id(ctx.user_id, id).await?.is_none() {
            return Ok(None);
        }
        self.require_person(ctx, draft.person_id).await?;

        let updated = self.contacts.update(ctx.user_id, id, draft).await?;
        if updated.is_some() {
            info!(user_id = %ctx.user_id, contact_id = %id, "Contact updated");
        }
        Ok(updated)
    }

    /// Delete a contact, returning it.
    pub async fn remove(&self, ctx: &RequestContext, id: Uuid) -> Result<Option<Contact>, AppError> {
        let removed = self.contacts.delete(ctx.user_id, id).await?;
        if removed.is_some() {
            info!(user_id = %ctx.user_id, contact_id = %id, "Contact removed");
        }
        Ok(removed)
    }

    /// Set or clear the blacklist marker.
    pub async fn set_blocked(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        blocked: bool,
    ) -> Result<Option<Contact>, AppError> {
        let contact = self.contacts.set_blocked(ctx.user_id, id, blocked).await?;
        if contact.is_some() {
            info!(user_id = %ctx.user_id, contact_id = %id, blocked, "Contact blacklist changed");
        }
        Ok(contact)
    }

    async fn require_person(&self, ctx: &RequestContext, person_id: Uuid) -> Result<(), AppError> {
        self.persons
            .find_by_id(ctx.user_id, person_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Person not found"))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use contactbook_core::error::ErrorKind;
    use contactbook_database::MemoryStore;
    use contactbook_database::store::conflict;

    use super::*;
    use crate::testing::{context, draft, seed_person};

    fn service(store: &Arc<MemoryStore>) -> ContactService {
        ContactService::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn test_create_then_lookup_by_every_key() {
        let store = Arc::new(MemoryStore::new());
        let contacts = service(&store);
        let alice = context("alice");
        let jon = seed_person(&store, &alice, "Jon", "Doe").await;

        let created = contacts
            .create(&alice, &draft(jon.id, "jon@example.com", "+380501112233"))
            .await
            .unwrap();

        let by_id = contacts.get(&alice, created.id).await.unwrap().unwrap();
        assert_eq!(by_id, created);
        assert_eq!(by_id.to_draft(), draft(jon.id, "jon@example.com", "+380501112233"));
        assert_eq!(
            contacts.get_by_email(&alice, "jon@example.com").await.unwrap(),
            Some(created.clone())
        );
        assert_eq!(
            contacts.get_by_phone(&alice, "+380501112233").await.unwrap(),
            Some(created.clone())
        );
        assert_eq!(contacts.list_by_person(&alice, jon.id).await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_other_owner_sees_nothing() {
        let store = Arc::new(MemoryStore::new());
        let contacts = service(&store);
        let alice = context("alice");
        let bob = context("bob");
        let jon = seed_person(&store, &alice, "Jon", "Doe").await;
        let created = contacts
            .create(&alice, &draft(jon.id, "jon@example.com", "+380501112233"))
            .await
            .unwrap();

        assert!(contacts.get(&bob, created.id).await.unwrap().is_none());
        assert!(contacts.get_by_email(&bob, "jon@example.com").await.unwrap().is_none());
        assert!(contacts.list(&bob, PageRequest::default()).await.unwrap().is_empty());
        assert!(contacts.remove(&bob, created.id).await.unwrap().is_none());
        assert!(contacts.set_blocked(&bob, created.id, true).await.unwrap().is_none());

        // still there for its owner
        assert!(contacts.get(&alice, created.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_rejects_foreign_person() {
        let store = Arc::new(MemoryStore::new());
        let contacts = service(&store);
        let alice = context("alice");
        let bob = context("bob");
        let bobs_person = seed_person(&store, &bob, "Jon", "Doe").await;

        let err = contacts
            .create(&alice, &draft(bobs_person.id, "jon@example.com", "+380501112233"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "Person not found");
    }

    #[tokio::test]
    async fn test_duplicate_email_and_phone_conflict() {
        let store = Arc::new(MemoryStore::new());
        let contacts = service(&store);
        let alice = context("alice");
        let bob = context("bob");
        let jon = seed_person(&store, &alice, "Jon", "Doe").await;
        let ann = seed_person(&store, &bob, "Ann", "Lee").await;

        contacts
            .create(&alice, &draft(jon.id, "jon@example.com", "+380501112233"))
            .await
            .unwrap();

        let same_email = contacts
            .create(&bob, &draft(ann.id, "jon@example.com", "+380509990000"))
            .await
            .unwrap_err();
        assert_eq!(same_email.kind, ErrorKind::Conflict);
        assert_eq!(same_email.message, conflict::CONTACT_EMAIL_TAKEN);

        let same_phone = contacts
            .create(&bob, &draft(ann.id, "ann@example.com", "+380501112233"))
            .await
            .unwrap_err();
        assert_eq!(same_phone.message, conflict::CONTACT_PHONE_TAKEN);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_ignores_missing() {
        let store = Arc::new(MemoryStore::new());
        let contacts = service(&store);
        let alice = context("alice");
        let jon = seed_person(&store, &alice, "Jon", "Doe").await;
        let created = contacts
            .create(&alice, &draft(jon.id, "jon@example.com", "+380501112233"))
            .await
            .unwrap();

        let mut replacement = draft(jon.id, "jon.doe@example.com", "+380507778899");
        replacement.date_of_birth = NaiveDate::from_ymd_opt(1985, 1, 2).unwrap();
        replacement.note = Some("college".into());
        replacement.blocked = true;

        let updated = contacts
            .update(&alice, created.id, &replacement)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.to_draft(), replacement);
        assert!(updated.updated_at >= created.updated_at);

        let missing = contacts
            .update(&alice, Uuid::now_v7(), &replacement)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_remove_and_block() {
        let store = Arc::new(MemoryStore::new());
        let contacts = service(&store);
        let alice = context("alice");
        let jon = seed_person(&store, &alice, "Jon", "Doe").await;
        let created = contacts
            .create(&alice, &draft(jon.id, "jon@example.com", "+380501112233"))
            .await
            .unwrap();

        let blocked = contacts.set_blocked(&alice, created.id, true).await.unwrap().unwrap();
        assert!(blocked.blocked);

        let removed = contacts.remove(&alice, created.id).await.unwrap().unwrap();
        assert_eq!(removed.id, created.id);
        assert!(contacts.get(&alice, created.id).await.unwrap().is_none());
        assert!(contacts.remove(&alice, created.id).await.unwrap().is_none());
    }
}
