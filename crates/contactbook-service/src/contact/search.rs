//! Name and email search over the acting user's address book.

use std::sync::Arc;

use tracing::debug;

use contactbook_core::config::ContactsConfig;
use contactbook_core::error::AppError;
use contactbook_database::{ContactStore, PersonStore};
use contactbook_entity::contact::Contact;
use contactbook_entity::person::Person;

use crate::context::RequestContext;

/// Finds contacts by a person's first or last name, falling back to an
/// exact email match.
#[derive(Debug, Clone)]
pub struct SearchService {
    contacts: Arc<dyn ContactStore>,
    persons: Arc<dyn PersonStore>,
    min_length: usize,
    max_length: usize,
}

impl SearchService {
    pub fn new(
        contacts: Arc<dyn ContactStore>,
        persons: Arc<dyn PersonStore>,
        config: &ContactsConfig,
    ) -> Self {
        Self {
            contacts,
            persons,
            min_length: config.search_min_length,
            max_length: config.search_max_length,
        }
    }

    /// Search with a free-text token.
    ///
    /// Every person whose first or last name equals the token contributes
    /// its earliest contact; persons without contacts are skipped. Only when
    /// no person matches by name are contacts with that exact email
    /// returned instead.
    pub async fn search(&self, ctx: &RequestContext, find: &str) -> Result<Vec<Contact>, AppError> {
        let token = find.trim();
        let len = token.chars().count();
        if len < self.min_length || len > self.max_length {
            return Err(AppError::validation(format!(
                "Search text must be between {} and {} characters",
                self.min_length, self.max_length
            )));
        }

        let persons = self.matching_persons(ctx, token).await?;
        if persons.is_empty() {
            debug!(user_id = %ctx.user_id, "No person matched by name, trying email");
            return self.contacts.find_all_by_email(ctx.user_id, token).await;
        }

        let mut found = Vec::with_capacity(persons.len());
        for person in &persons {
            let contacts = self.contacts.find_by_person(ctx.user_id, person.id).await?;
            if let Some(first) = contacts.into_iter().next() {
                found.push(first);
            }
        }
        Ok(found)
    }

    async fn matching_persons(
        &self,
        ctx: &RequestContext,
        token: &str,
    ) -> Result<Vec<Person>, AppError> {
        let mut persons = self.persons.find_by_first_name(ctx.user_id, token).await?;
        for person in self.persons.find_by_last_name(ctx.user_id, token).await? {
            if !persons.iter().any(|p| p.id == person.id) {
                persons.push(person);
            }
        }
        Ok(persons)
    }
}
