use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Origins allowed when `CORS_ALLOWED_ORIGINS` is not set: the React and
/// Vite development servers.
const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:3000,http://localhost:5173,http://127.0.0.1:3000,http://127.0.0.1:5173";

#[derive(Debug, Clone)]
pub struct ProfileConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub store: StoreConfig,
    pub cors: CorsConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub mongodb: Option<MongoConfig>,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: Secret<String>,
    pub database: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub max_age_secs: u64,
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub html_path: String,
}

impl ProfileConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common = core_config::Config::load()?;

        let environment: Environment = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "dev".to_string())
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;
        let is_prod = environment == Environment::Prod;

        let backend: StoreBackend = get_env("STORE_BACKEND", Some("mongo"), is_prod)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let mongodb = match backend {
            StoreBackend::Mongo => Some(MongoConfig {
                uri: Secret::new(get_env("MONGODB_URI", None, is_prod)?),
                database: get_env("MONGODB_DATABASE", Some("profile_db"), is_prod)?,
            }),
            StoreBackend::Memory => None,
        };

        let allowed_origins = parse_origins(&get_env(
            "CORS_ALLOWED_ORIGINS",
            Some(DEFAULT_ALLOWED_ORIGINS),
            is_prod,
        )?);

        let max_age_secs = get_env("CORS_MAX_AGE_SECS", Some("43200"), is_prod)?
            .parse()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid CORS_MAX_AGE_SECS: {}", e))
            })?;

        Ok(ProfileConfig {
            common,
            environment,
            store: StoreConfig { backend, mongodb },
            cors: CorsConfig {
                allowed_origins,
                max_age_secs,
            },
            dashboard: DashboardConfig {
                html_path: get_env("DASHBOARD_HTML_PATH", Some("dashboard.html"), is_prod)?,
            },
        })
    }

    /// Development defaults backed by the in-memory store.
    pub fn in_memory() -> Self {
        ProfileConfig {
            common: core_config::Config::default(),
            environment: Environment::Dev,
            store: StoreConfig {
                backend: StoreBackend::Memory,
                mongodb: None,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
                max_age_secs: 43200,
            },
            dashboard: DashboardConfig {
                html_path: "dashboard.html".to_string(),
            },
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "prod" | "production" => Ok(Environment::Prod),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
