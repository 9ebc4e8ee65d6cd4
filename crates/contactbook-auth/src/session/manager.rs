//! Session lifecycle manager: sign-up, login, refresh, logout, and
//! per-request authentication.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use contactbook_cache::keys;
use contactbook_cache::provider::CacheManager;
use contactbook_core::config::AuthConfig;
use contactbook_core::error::AppError;
use contactbook_core::traits::CacheProvider;
use contactbook_database::UserStore;
use contactbook_database::store::conflict;
use contactbook_entity::user::{CreateUser, User, UserSummary};

use crate::jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
use crate::password::{PasswordHasher, PasswordValidator};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub tokens: TokenPair,
    pub user: User,
}

/// Issues, rotates, and revokes tokens for user accounts.
#[derive(Clone)]
pub struct SessionManager {
    jwt_encoder: Arc<JwtEncoder>,
    jwt_decoder: Arc<JwtDecoder>,
    users: Arc<dyn UserStore>,
    password_hasher: PasswordHasher,
    password_validator: PasswordValidator,
    cache: Arc<CacheManager>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("password_validator", &self.password_validator)
            .finish()
    }
}

impl SessionManager {
    pub fn new(
        config: &AuthConfig,
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        users: Arc<dyn UserStore>,
        cache: Arc<CacheManager>,
    ) -> Self {
        Self {
            jwt_encoder,
            jwt_decoder,
            users,
            password_hasher: PasswordHasher::new(),
            password_validator: PasswordValidator::new(config),
            cache,
        }
    }

    /// Register a new account. Emails are stored trimmed and lowercased.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let email = normalize_email(email);
        self.password_validator
            .validate(password, &[username, email.as_str()])?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(conflict::ACCOUNT_EXISTS));
        }

        let password_hash = self.password_hasher.hash_password(password).await?;
        let user = self
            .users
            .create(&CreateUser {
                username: username.trim().to_string(),
                email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "Account created");
        Ok(user)
    }

    /// Verify credentials and open a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let email = normalize_email(email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::authentication(INVALID_CREDENTIALS))?;

        if !self
            .password_hasher
            .verify_password(password, &user.password_hash)
            .await?
        {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let tokens = self.issue_tokens(&user).await?;
        info!(user_id = %user.id, "Login successful");
        Ok(LoginResult { tokens, user })
    }

    /// Exchange the current refresh token for a new pair.
    ///
    /// Presenting any refresh token other than the one issued last closes
    /// the session, so a stolen token can be used at most once.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.jwt_decoder.decode_refresh_token(refresh_token)?;
        let user = self
            .users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("Could not validate credentials"))?;

        if !user.holds_refresh_token(refresh_token) {
            warn!(user_id = %user.id, "Refresh token reuse detected, revoking session");
            self.users.update_refresh_token(user.id, None).await?;
            return Err(AppError::authentication("Invalid refresh token"));
        }

        let tokens = self.issue_tokens(&user).await?;
        debug!(user_id = %user.id, "Tokens refreshed");
        Ok(tokens)
    }

    /// Revoke the presented access token and the stored refresh token.
    pub async fn logout(&self, claims: &Claims) -> Result<(), AppError> {
        self.jwt_decoder
            .blocklist_token(claims.jti, claims.remaining_ttl_seconds())
            .await?;
        self.users.update_refresh_token(claims.user_id(), None).await?;
        self.forget_user(claims.user_id()).await;

        info!(user_id = %claims.user_id(), "Logged out");
        Ok(())
    }

    /// Validate an access token and resolve its user, consulting the cache
    /// before the store.
    pub async fn authenticate(
        &self,
        access_token: &str,
    ) -> Result<(Claims, UserSummary), AppError> {
        let claims = self.jwt_decoder.decode_access_token(access_token).await?;
        let key = keys::user_by_id(claims.user_id());

        match self.cache.get_json::<UserSummary>(&key).await {
            Ok(Some(user)) => return Ok((claims, user)),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "User cache read failed"),
        }

        let user = self
            .users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("Could not validate credentials"))?;
        let summary = UserSummary::from(&user);

        if let Err(e) = self
            .cache
            .set_json(&key, &summary, self.jwt_encoder.access_ttl())
            .await
        {
            warn!(error = %e, "User cache write failed");
        }
        Ok((claims, summary))
    }

    /// Drop the cached summary after the user record changed.
    pub async fn forget_user(&self, user_id: Uuid) {
        if let Err(e) = self.cache.delete(&keys::user_by_id(user_id)).await {
            warn!(user_id = %user_id, error = %e, "Failed to evict cached user");
        }
    }

    async fn issue_tokens(&self, user: &User) -> Result<TokenPair, AppError> {
        let tokens = self.jwt_encoder.generate_token_pair(user.id, &user.email)?;
        self.users
            .update_refresh_token(user.id, Some(&tokens.refresh_token))
            .await?;
        Ok(tokens)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
