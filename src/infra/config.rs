use std::net::SocketAddr;
use std::str::FromStr;

use env_helpers::get_env_default;
use secrecy::{ExposeSecret, SecretString};
use time::Duration;
use url::Url;

use crate::{
    application::helpers::host_parsing::{HostRules, is_loopback, normalize_hostname},
    infra::error::InfraError,
    use_cases::tenant::TenantUrlStyle,
};

pub const MIN_SESSION_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppEnv::Development => "development",
            AppEnv::Production => "production",
        }
    }
}

impl FromStr for AppEnv {
    type Err = InfraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "" => Ok(AppEnv::Development),
            "production" | "prod" => Ok(AppEnv::Production),
            _ => Err(InfraError::ConfigInvalid {
                var: "APP_ENV",
                reason: "must be development or production",
            }),
        }
    }
}

pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub app_env: AppEnv,
    /// Production root domain, e.g. "cavyor.in".
    pub root_domain: String,
    /// Port used in local `<slug>.localhost:<port>` hints.
    pub dev_port: u16,
    pub preview_domain_suffix: Option<String>,
    /// Labels that never resolve to a tenant and can never become a slug.
    pub reserved_subdomains: Vec<String>,
    pub api_base_url: Url,
    pub session_secret: SecretString,
    pub session_ttl: Duration,
    pub admin_email: Option<String>,
    pub admin_password: Option<SecretString>,
    pub seed_demo_tenants: bool,
    pub slug_max_attempts: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        let database_url = required("DATABASE_URL")?;
        let db_max_connections: u32 = get_env_default("DB_MAX_CONNECTIONS", 5);
        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 4000)));
        let app_env: AppEnv = get_env_default("APP_ENV", String::from("development")).parse()?;
        let root_domain: String = get_env_default("ROOT_DOMAIN", String::from("example.com"));
        let dev_port: u16 = get_env_default("DEV_PORT", 3001);
        let preview_domain_suffix = optional("PREVIEW_DOMAIN_SUFFIX");
        let reserved_subdomains =
            parse_list(&get_env_default("RESERVED_SUBDOMAINS", String::from("www,api,admin")));

        let api_base_url: Url = get_env_default(
            "API_BASE_URL",
            String::from("http://localhost:4000"),
        )
        .parse()
        .map_err(|_| InfraError::ConfigInvalid {
            var: "API_BASE_URL",
            reason: "must be an absolute URL",
        })?;

        let session_secret = SecretString::from(required("SESSION_SECRET")?);
        if session_secret.expose_secret().len() < MIN_SESSION_SECRET_LEN {
            return Err(InfraError::ConfigInvalid {
                var: "SESSION_SECRET",
                reason: "must be at least 32 bytes",
            });
        }
        let session_ttl_secs: i64 = get_env_default("SESSION_TTL_SECS", 86_400);
        if session_ttl_secs <= 0 {
            return Err(InfraError::ConfigInvalid {
                var: "SESSION_TTL_SECS",
                reason: "must be positive",
            });
        }

        let admin_email = optional("ADMIN_EMAIL");
        let admin_password = optional("ADMIN_PASSWORD").map(SecretString::from);
        let seed_demo_tenants: bool = get_env_default("SEED_DEMO_TENANTS", false);
        let slug_max_attempts: usize = get_env_default("SLUG_MAX_ATTEMPTS", 100);
        if slug_max_attempts == 0 {
            return Err(InfraError::ConfigInvalid {
                var: "SLUG_MAX_ATTEMPTS",
                reason: "must be at least 1",
            });
        }

        Ok(Self {
            database_url,
            db_max_connections,
            bind_addr,
            app_env,
            root_domain,
            dev_port,
            preview_domain_suffix,
            reserved_subdomains,
            api_base_url,
            session_secret,
            session_ttl: Duration::seconds(session_ttl_secs),
            admin_email,
            admin_password,
            seed_demo_tenants,
            slug_max_attempts,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env == AppEnv::Production
    }

    pub fn host_rules(&self) -> HostRules {
        HostRules::new(
            &self.root_domain,
            self.preview_domain_suffix.as_deref(),
            &self.reserved_subdomains,
        )
    }

    pub fn tenant_url_style(&self) -> TenantUrlStyle {
        match self.app_env {
            AppEnv::Development => TenantUrlStyle::Local {
                port: self.dev_port,
            },
            AppEnv::Production => TenantUrlStyle::Subdomain {
                root_domain: self.root_domain.clone(),
            },
        }
    }

    /// Browser origins allowed to call the API with credentials: the root
    /// domain and its subdomains, preview deployments, and loopback outside
    /// production.
    pub fn is_allowed_origin(&self, origin: &str) -> bool {
        let Some(host) = Url::parse(origin)
            .ok()
            .and_then(|url| url.host_str().and_then(normalize_hostname))
        else {
            return false;
        };

        let under = |domain: &str| {
            !domain.is_empty()
                && (host == domain
                    || host
                        .strip_suffix(domain)
                        .is_some_and(|rest| rest.ends_with('.')))
        };

        (is_loopback(&host) && !self.is_production())
            || under(&self.root_domain.to_ascii_lowercase())
            || self
                .preview_domain_suffix
                .as_deref()
                .is_some_and(|suffix| under(&suffix.to_ascii_lowercase()))
    }
}

fn required(var: &'static str) -> Result<String, InfraError> {
    optional(var).ok_or(InfraError::ConfigMissing { var })
}

fn optional(var: &'static str) -> Option<String> {
    let value: String = get_env_default(var, String::new());
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim().to_ascii_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}
