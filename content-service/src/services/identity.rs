//! Verification of externally issued identity tokens.
//!
//! The identity provider signs RS256 tokens; this service verifies them
//! against the provider's public key and maps the claims into the
//! [`Identity`] consumed by the access-control core. Sign-in, sessions and
//! OAuth redirects all live in the provider, not here.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use service_core::error::AppError;

use crate::access::Identity;
use crate::config::IdentityConfig;

/// Claims this service relies on; everything else lands in `extra` and is
/// exposed to the access core as the identity's claims bag.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub jti: String,
    pub exp: i64,
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TokenClaims {
    pub fn into_identity(self) -> Identity {
        Identity {
            subject: self.sub,
            email: self.email,
            claims: serde_json::Value::Object(self.extra),
        }
    }

    /// Seconds until this token expires; used as the revocation TTL so a
    /// revoked session does not outlive its token.
    pub fn seconds_until_expiry(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }
}

pub struct IdentityVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl IdentityVerifier {
    pub fn new(config: &IdentityConfig) -> Result<Self, AppError> {
        let public_key = std::fs::read(&config.public_key_path).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "Failed to read identity public key at {}: {}",
                config.public_key_path,
                e
            ))
        })?;
        let decoding_key = DecodingKey::from_rsa_pem(&public_key)?;

        let mut validation = Validation::new(Algorithm::RS256);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        if let Some(audience) = &config.audience {
            validation.set_audience(&[audience]);
        } else {
            validation.validate_aud = false;
        }

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, AppError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}
