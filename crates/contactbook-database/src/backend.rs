//! Backend selection.

use std::sync::Arc;

use tracing::{info, warn};

use contactbook_core::config::{DatabaseBackend, DatabaseConfig};
use contactbook_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration::run_migrations;
use crate::repositories::{ContactRepository, PersonRepository, UserRepository};
use crate::store::{ContactStore, PersonStore, UserStore};

/// Handle to the configured store implementation.
#[derive(Debug, Clone)]
pub struct Database {
    pool: Option<DatabasePool>,
    users: Arc<dyn UserStore>,
    persons: Arc<dyn PersonStore>,
    contacts: Arc<dyn ContactStore>,
}

impl Database {
    /// Open the backend named in `config`, applying migrations for
    /// PostgreSQL when enabled.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
            DatabaseBackend::Memory => {
                warn!("Using the in-memory store; all data is lost on shutdown");
                Ok(Self::memory())
            }
        }
    }

    /// Repositories backed by a PostgreSQL pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            persons: Arc::new(PersonRepository::new(pg.clone())),
            contacts: Arc::new(ContactRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// A fresh, empty in-memory store.
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            pool: None,
            users: store.clone(),
            persons: store.clone(),
            contacts: store,
        }
    }

    pub fn users(&self) -> Arc<dyn UserStore> {
        Arc::clone(&self.users)
    }

    pub fn persons(&self) -> Arc<dyn PersonStore> {
        Arc::clone(&self.persons)
    }

    pub fn contacts(&self) -> Arc<dyn ContactStore> {
        Arc::clone(&self.contacts)
    }

    /// Short backend name for logs and health output.
    pub fn backend_name(&self) -> &'static str {
        if self.pool.is_some() { "postgres" } else { "memory" }
    }

    /// Check connectivity. The in-memory backend is always reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
        info!(backend = self.backend_name(), "Database closed");
    }
}
