//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use contactbook_auth::{JwtDecoder, JwtEncoder, SessionManager};
use contactbook_cache::provider::CacheManager;
use contactbook_core::config::AppConfig;
use contactbook_core::traits::{Clock, StorageProvider};
use contactbook_database::Database;
use contactbook_service::{
    BirthdayService, ContactService, PersonService, SearchService, UserService,
};
use contactbook_storage::AvatarProcessor;

use crate::middleware::rate_limit::RateLimits;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Store backend (PostgreSQL or in-memory)
    pub database: Database,
    /// Cache manager (Redis or in-memory)
    pub cache: Arc<CacheManager>,
    /// Avatar file storage
    pub storage: Arc<dyn StorageProvider>,
    /// Per-route token buckets
    pub rate_limits: RateLimits,

    // ── Auth ─────────────────────────────────────────────────
    pub session_manager: Arc<SessionManager>,

    // ── Services ─────────────────────────────────────────────
    pub contact_service: Arc<ContactService>,
    pub search_service: Arc<SearchService>,
    pub birthday_service: Arc<BirthdayService>,
    pub person_service: Arc<PersonService>,
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Wire auth and services on top of the infrastructure handles.
    pub fn new(
        config: AppConfig,
        database: Database,
        cache: Arc<CacheManager>,
        storage: Arc<dyn StorageProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth, Arc::clone(&cache)));
        let session_manager = Arc::new(SessionManager::new(
            &config.auth,
            jwt_encoder,
            jwt_decoder,
            database.users(),
            Arc::clone(&cache),
        ));

        let avatars = AvatarProcessor::new(config.storage.avatar.clone(), Arc::clone(&storage));
        let contact_service = Arc::new(ContactService::new(database.contacts(), database.persons()));
        let search_service = Arc::new(SearchService::new(
            database.contacts(),
            database.persons(),
            &config.contacts,
        ));
        let birthday_service = Arc::new(BirthdayService::new(
            database.contacts(),
            clock,
            &config.contacts,
        ));
        let person_service = Arc::new(PersonService::new(database.persons()));
        let user_service = Arc::new(UserService::new(
            database.users(),
            avatars,
            Arc::clone(&session_manager),
        ));

        Self {
            rate_limits: RateLimits::new(&config.rate_limit),
            config: Arc::new(config),
            database,
            cache,
            storage,
            session_manager,
            contact_service,
            search_service,
            birthday_service,
            person_service,
            user_service,
        }
    }
}
