//! Owner-scoped person CRUD.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use contactbook_core::error::AppError;
use contactbook_database::PersonStore;
use contactbook_entity::person::{Person, PersonDraft};

use crate::context::RequestContext;

/// Manages the acting user's persons.
#[derive(Debug, Clone)]
pub struct PersonService {
    persons: Arc<dyn PersonStore>,
}

impl PersonService {
    pub fn new(persons: Arc<dyn PersonStore>) -> Self {
        Self { persons }
    }

    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Person>, AppError> {
        self.persons.find_all(ctx.user_id).await
    }

    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Option<Person>, AppError> {
        self.persons.find_by_id(ctx.user_id, id).await
    }

    /// Create a person. Names are unique per user.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        draft: &PersonDraft,
    ) -> Result<Person, AppError> {
        let person = self.persons.create(ctx.user_id, &normalize(draft)).await?;
        info!(user_id = %ctx.user_id, person_id = %person.id, "Person created");
        Ok(person)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        draft: &PersonDraft,
    ) -> Result<Option<Person>, AppError> {
        self.persons.update(ctx.user_id, id, &normalize(draft)).await
    }

    /// Delete a person and every contact attached to it.
    pub async fn remove(&self, ctx: &RequestContext, id: Uuid) -> Result<Option<Person>, AppError> {
        let removed = self.persons.delete(ctx.user_id, id).await?;
        if removed.is_some() {
            info!(user_id = %ctx.user_id, person_id = %id, "Person removed");
        }
        Ok(removed)
    }
}

fn normalize(draft: &PersonDraft) -> PersonDraft {
    PersonDraft {
        first_name: draft.first_name.trim().to_string(),
        last_name: draft.last_name.trim().to_string(),
    }
}
