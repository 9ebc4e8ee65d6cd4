//! Person repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use contactbook_core::error::{AppError, ErrorKind};
use contactbook_core::result::AppResult;
use contactbook_entity::person::{Person, PersonDraft};

use super::{constraint, violated_constraint};
use crate::store::{PersonStore, conflict};

/// Repository for address-book persons.
#[derive(Debug, Clone)]
pub struct PersonRepository {
    pool: PgPool,
}

impl PersonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_write_err(e: sqlx::Error, action: &'static str) -> AppError {
        match violated_constraint(&e).as_deref() {
            Some(constraint::PERSONS_NAME_KEY) => AppError::conflict(conflict::PERSON_EXISTS),
            _ => AppError::with_source(ErrorKind::Database, action, e),
        }
    }
}

#[async_trait]
impl PersonStore for PersonRepository {
    async fn find_all(&self, user_id: Uuid) -> AppResult<Vec<Person>> {
        sqlx::query_as::<_, Person>(
            "SELECT * FROM persons WHERE user_id = $1 ORDER BY created_at, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list persons", e))
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Person>> {
        sqlx::query_as::<_, Person>("SELECT * FROM persons WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find person", e))
    }

    async fn find_by_first_name(&self, user_id: Uuid, first_name: &str) -> AppResult<Vec<Person>> {
        sqlx::query_as::<_, Person>(
            "SELECT * FROM persons WHERE user_id = $1 AND first_name = $2 ORDER BY created_at, id",
        )
        .bind(user_id)
        .bind(first_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find persons by first name", e)
        })
    }

    async fn find_by_last_name(&self, user_id: Uuid, last_name: &str) -> AppResult<Vec<Person>> {
        sqlx::query_as::<_, Person>(
            "SELECT * FROM persons WHERE user_id = $1 AND last_name = $2 ORDER BY created_at, id",
        )
        .bind(user_id)
        .bind(last_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find persons by last name", e)
        })
    }

    async fn create(&self, user_id: Uuid, data: &PersonDraft) -> AppResult<Person> {
        sqlx::query_as::<_, Person>(
            "INSERT INTO persons (user_id, first_name, last_name) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_write_err(e, "Failed to create person"))
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        data: &PersonDraft,
    ) -> AppResult<Option<Person>> {
        sqlx::query_as::<_, Person>(
            "UPDATE persons SET first_name = $3, last_name = $4, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_write_err(e, "Failed to update person"))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Person>> {
        // contacts.person_id cascades
        sqlx::query_as::<_, Person>(
            "DELETE FROM persons WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete person", e))
    }
}
