use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub mongodb: MongoConfig,
    pub redis: RedisConfig,
    pub identity: IdentityConfig,
    pub admin: AdminConfig,
    pub security: SecurityConfig,
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Prod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub public_key_path: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

/// Admin allowlist configuration.
///
/// `allowed_emails` is the raw comma-separated string; it stays an `Option`
/// so the access core can distinguish "not configured" from a real denial.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub allowed_emails: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    pub page_size: usize,
}

impl ContentConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let env_str = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let environment: Environment = env_str
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let is_prod = environment == Environment::Prod;

        let config = ContentConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("content-service"), is_prod)?,
            service_version: get_env("SERVICE_VERSION", Some(env!("CARGO_PKG_VERSION")), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", Some("mongodb://localhost:27017"), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("association_cms"), is_prod)?,
            },
            redis: RedisConfig {
                url: get_env("REDIS_URL", Some("redis://localhost:6379"), is_prod)?,
            },
            identity: IdentityConfig {
                public_key_path: get_env("IDENTITY_PUBLIC_KEY_PATH", None, is_prod)?,
                issuer: env::var("IDENTITY_ISSUER").ok(),
                audience: env::var("IDENTITY_AUDIENCE").ok(),
            },
            admin: AdminConfig {
                // Absent means "not configured"; never defaulted so the
                // access core can surface the distinct reason.
                allowed_emails: env::var("ADMIN_EMAILS").ok(),
            },
            security: SecurityConfig {
                allowed_origins: get_env(
                    "ALLOWED_ORIGINS",
                    Some("http://localhost:3000"),
                    is_prod,
                )?
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            },
            listing: ListingConfig {
                page_size: get_env("LIST_PAGE_SIZE", Some("10"), is_prod)?
                    .parse()
                    .unwrap_or(10),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.common.port == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "PORT must be greater than 0"
            )));
        }

        if self.listing.page_size == 0 || self.listing.page_size > 100 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "LIST_PAGE_SIZE must be between 1 and 100"
            )));
        }

        if self.environment == Environment::Prod {
            if self.security.allowed_origins.iter().any(|o| o == "*") {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "Wildcard CORS origin not allowed in production"
                )));
            }

            // Not fatal: the access core reports not_configured per request
            // with an actionable message for the operator.
            if self.admin.allowed_emails.is_none() {
                tracing::error!(
                    "ADMIN_EMAILS is not set - the admin dashboard will reject all access"
                );
            }
        }

        Ok(())
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required in production but not set",
                    key
                ))))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required but not set",
                    key
                ))))
            }
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_str() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Dev);
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Prod);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_get_env_dev_falls_back_to_default() {
        let value = get_env("CONTENT_SERVICE_TEST_UNSET_KEY", Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn test_get_env_prod_requires_value() {
        let result = get_env("CONTENT_SERVICE_TEST_UNSET_KEY", Some("fallback"), true);
        assert!(result.is_err());
    }
}
