//! In-memory admin accounts plus deterministic hasher/session stand-ins.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::jwt::AdminClaims,
    domain::entities::admin_user::AdminRole,
    use_cases::{
        admin_auth::{AdminUserProfile, AdminUserRepo, PasswordHasher, SessionAuthenticator},
        health::HealthProbe,
    },
};

#[derive(Default)]
pub struct InMemoryAdminUserRepo {
    pub users: Mutex<HashMap<Uuid, AdminUserProfile>>,
}

impl InMemoryAdminUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<AdminUserProfile>) -> Self {
        Self {
            users: Mutex::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }

    pub fn get(&self, user_id: Uuid) -> Option<AdminUserProfile> {
        self.users.lock().unwrap().get(&user_id).cloned()
    }

    pub fn find_by_email(&self, email: &str) -> Option<AdminUserProfile> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned()
    }

    pub fn deactivate(&self, user_id: Uuid) {
        if let Some(user) = self.users.lock().unwrap().get_mut(&user_id) {
            user.is_active = false;
        }
    }
}

#[async_trait]
impl AdminUserRepo for InMemoryAdminUserRepo {
    async fn get_by_email(&self, email: &str) -> AppResult<Option<AdminUserProfile>> {
        Ok(self.find_by_email(email))
    }

    async fn get_by_id(&self, user_id: Uuid) -> AppResult<Option<AdminUserProfile>> {
        Ok(self.get(user_id))
    }

    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        role: AdminRole,
    ) -> AppResult<AdminUserProfile> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == email) {
            return Err(AppError::Conflict(
                "An admin with this email already exists".into(),
            ));
        }

        let user = AdminUserProfile {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role,
            is_active: true,
            last_login_at: None,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn record_login(&self, user_id: Uuid) -> AppResult<()> {
        if let Some(user) = self.users.lock().unwrap().get_mut(&user_id) {
            user.last_login_at = Some(Utc::now());
        }
        Ok(())
    }
}

/// Stores passwords as `plain:<password>`.
pub struct PlainTextPasswordHasher;

impl PasswordHasher for PlainTextPasswordHasher {
    fn hash(&self, password: &str) -> AppResult<String> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, password_hash: &str) -> AppResult<bool> {
        Ok(password_hash.strip_prefix("plain:") == Some(password))
    }

    fn dummy_hash(&self) -> &'static str {
        "plain:"
    }
}

/// Issues `token:<user id>` and accepts nothing else.
pub struct StaticSessionAuthenticator;

impl SessionAuthenticator for StaticSessionAuthenticator {
    fn issue(&self, user: &AdminUserProfile) -> AppResult<String> {
        Ok(format!("token:{}", user.id))
    }

    fn verify(&self, token: &str) -> AppResult<AdminClaims> {
        let sub = token.strip_prefix("token:").ok_or(AppError::Unauthorized)?;
        Ok(AdminClaims {
            sub: sub.to_string(),
            email: String::new(),
            role: String::new(),
            exp: 0,
            iat: 0,
        })
    }
}

/// `Cookie` header value carrying a valid session for `user`.
pub fn session_cookie(user: &AdminUserProfile) -> String {
    format!("admin_session=token:{}", user.id)
}

pub struct StaticHealthProbe;

#[async_trait]
impl HealthProbe for StaticHealthProbe {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct FailingHealthProbe;

#[async_trait]
impl HealthProbe for FailingHealthProbe {
    async fn ping(&self) -> AppResult<()> {
        Err(AppError::Database("connection refused".into()))
    }
}
