use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::jwt::AdminClaims;
use crate::application::validators::is_valid_email;
use crate::domain::entities::admin_user::AdminRole;

pub const MIN_ADMIN_PASSWORD_LEN: usize = 8;

#[async_trait]
pub trait AdminUserRepo: Send + Sync {
    async fn get_by_email(&self, email: &str) -> AppResult<Option<AdminUserProfile>>;
    async fn get_by_id(&self, user_id: Uuid) -> AppResult<Option<AdminUserProfile>>;
    /// Duplicate emails surface as `AppError::Conflict`.
    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        role: AdminRole,
    ) -> AppResult<AdminUserProfile>;
    async fn record_login(&self, user_id: Uuid) -> AppResult<()>;
}

pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> AppResult<String>;
    fn verify(&self, password: &str, password_hash: &str) -> AppResult<bool>;
    /// A well-formed hash that matches no password, verified when the account is missing.
    fn dummy_hash(&self) -> &'static str;
}

pub trait SessionAuthenticator: Send + Sync {
    fn issue(&self, user: &AdminUserProfile) -> AppResult<String>;
    fn verify(&self, token: &str) -> AppResult<AdminClaims>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminUserProfile {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: AdminRole,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// The authenticated admin attached to a gated request.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminSession {
    pub user_id: Uuid,
    pub email: String,
    pub role: AdminRole,
}

#[derive(Clone)]
pub struct AdminAuthUseCases {
    repo: Arc<dyn AdminUserRepo>,
    hasher: Arc<dyn PasswordHasher>,
    sessions: Arc<dyn SessionAuthenticator>,
}

impl AdminAuthUseCases {
    pub fn new(
        repo: Arc<dyn AdminUserRepo>,
        hasher: Arc<dyn PasswordHasher>,
        sessions: Arc<dyn SessionAuthenticator>,
    ) -> Self {
        Self {
            repo,
            hasher,
            sessions,
        }
    }

    /// Check credentials and issue a session token.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(AdminSession, String)> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput(
                "Email and password are required".into(),
            ));
        }

        let Some(user) = self
            .repo
            .get_by_email(&email)
            .await?
            .filter(|user| user.is_active)
        else {
            let _ = self
                .verify_password(password, self.hasher.dummy_hash())
                .await;
            tracing::info!("Admin login rejected: unknown or inactive account");
            return Err(AppError::InvalidCredentials);
        };

        if !self.verify_password(password, &user.password_hash).await? {
            tracing::info!(user_id = %user.id, "Admin login rejected: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        self.repo.record_login(user.id).await?;
        let token = self.sessions.issue(&user)?;
        tracing::info!(user_id = %user.id, "Admin logged in");

        Ok((
            AdminSession {
                user_id: user.id,
                email: user.email,
                role: user.role,
            },
            token,
        ))
    }

    /// Resolve a session token to a live, active admin.
    pub async fn authenticate(&self, token: &str) -> AppResult<AdminSession> {
        let claims = self.sessions.verify(token)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized)?;

        let user = self
            .repo
            .get_by_id(user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or(AppError::Unauthorized)?;

        Ok(AdminSession {
            user_id: user.id,
            email: user.email,
            role: user.role,
        })
    }

    /// Create the first super admin if no account with this email exists.
    /// Returns whether an account was created.
    #[instrument(skip(self, password))]
    pub async fn ensure_bootstrap_admin(
        &self,
        email: &str,
        password: &SecretString,
    ) -> AppResult<bool> {
        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(AppError::InvalidInput("Invalid admin email".into()));
        }
        if password.expose_secret().chars().count() < MIN_ADMIN_PASSWORD_LEN {
            return Err(AppError::InvalidInput(format!(
                "Admin password must be at least {MIN_ADMIN_PASSWORD_LEN} characters"
            )));
        }

        if self.repo.get_by_email(&email).await?.is_some() {
            return Ok(false);
        }

        let password_hash = self.hash_password(password.expose_secret()).await?;
        match self
            .repo
            .create(&email, &password_hash, AdminRole::SuperAdmin)
            .await
        {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Bootstrap admin created");
                Ok(true)
            }
            Err(AppError::Conflict(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    async fn verify_password(&self, password: &str, password_hash: &str) -> AppResult<bool> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
    }

    async fn hash_password(&self, password: &str) -> AppResult<String> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
