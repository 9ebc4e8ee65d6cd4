//! Contact repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use contactbook_core::error::{AppError, ErrorKind};
use contactbook_core::result::AppResult;
use contactbook_core::types::PageRequest;
use contactbook_entity::contact::{Contact, ContactDraft};

use super::{constraint, violated_constraint};
use crate::store::{ContactStore, conflict};

/// Repository for contacts.
#[derive(Debug, Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Map unique and foreign-key violations on insert/update.
    fn map_write_err(e: sqlx::Error, action: &'static str) -> AppError {
        match violated_constraint(&e).as_deref() {
            Some(constraint::CONTACTS_EMAIL_KEY) => AppError::conflict(conflict::CONTACT_EMAIL_TAKEN),
            Some(constraint::CONTACTS_PHONE_KEY) => AppError::conflict(conflict::CONTACT_PHONE_TAKEN),
            Some(constraint::CONTACTS_PERSON_FKEY) => AppError::not_found("Person not found"),
            _ => AppError::with_source(ErrorKind::Database, action, e),
        }
    }

    async fn fetch_many(&self, sql: &str, user_id: Uuid, key: &str) -> AppResult<Vec<Contact>> {
        sqlx::query_as::<_, Contact>(sql)
            .bind(user_id)
            .bind(key)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to query contacts", e))
    }

    async fn fetch_one_by(&self, sql: &str, user_id: Uuid, key: &str) -> AppResult<Option<Contact>> {
        sqlx::query_as::<_, Contact>(sql)
            .bind(user_id)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find contact", e))
    }
}

#[async_trait]
impl ContactStore for ContactRepository {
    async fn find_all(&self, user_id: Uuid, page: &PageRequest) -> AppResult<Vec<Contact>> {
        sqlx::query_as::<_, Contact>(
            "SELECT * FROM contacts WHERE user_id = $1 \
             ORDER BY created_at, id LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list contacts", e))
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Contact>> {
        sqlx::query_as::<_, Contact>(
            "SELECT * FROM contacts WHERE user_id = $1 ORDER BY created_at, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list contacts", e))
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Contact>> {
        sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find contact", e))
    }

    async fn find_by_email(&self, user_id: Uuid, email: &str) -> AppResult<Option<Contact>> {
        self.fetch_one_by(
            "SELECT * FROM contacts WHERE user_id = $1 AND email = $2",
            user_id,
            email,
        )
        .await
    }

    async fn find_all_by_email(&self, user_id: Uuid, email: &str) -> AppResult<Vec<Contact>> {
        self.fetch_many(
            "SELECT * FROM contacts WHERE user_id = $1 AND email = $2 ORDER BY created_at, id",
            user_id,
            email,
        )
        .await
    }

    async fn find_by_phone(&self, user_id: Uuid, phone: &str) -> AppResult<Option<Contact>> {
        self.fetch_one_by(
            "SELECT * FROM contacts WHERE user_id = $1 AND phone = $2",
            user_id,
            phone,
        )
        .await
    }

    async fn find_by_person(&self, user_id: Uuid, person_id: Uuid) -> AppResult<Vec<Contact>> {
        sqlx::query_as::<_, Contact>(
            "SELECT * FROM contacts WHERE user_id = $1 AND person_id = $2 ORDER BY created_at, id",
        )
        .bind(user_id)
        .bind(person_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list contacts of person", e)
        })
    }

    async fn create(&self, user_id: Uuid, data: &ContactDraft) -> AppResult<Contact> {
        sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (user_id, person_id, date_of_birth, email, phone, note, blocked) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(data.person_id)
        .bind(data.date_of_birth)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.note)
        .bind(data.blocked)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_write_err(e, "Failed to create contact"))
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        data: &ContactDraft,
    ) -> AppResult<Option<Contact>> {
        sqlx::query_as::<_, Contact>(
            "UPDATE contacts SET person_id = $3, date_of_birth = $4, email = $5, phone = $6, \
                                 note = $7, blocked = $8, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .bind(data.person_id)
        .bind(data.date_of_birth)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.note)
        .bind(data.blocked)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_write_err(e, "Failed to update contact"))
    }

    async fn set_blocked(
        &self,
        user_id: Uuid,
        id: Uuid,
        blocked: bool,
    ) -> AppResult<Option<Contact>> {
        sqlx::query_as::<_, Contact>(
            "UPDATE contacts SET blocked = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .bind(blocked)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to block contact", e))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Contact>> {
        sqlx::query_as::<_, Contact>(
            "DELETE FROM contacts WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete contact", e))
    }
}
