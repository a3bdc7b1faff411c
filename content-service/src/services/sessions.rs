//! Session revocation store.
//!
//! When an authenticated but non-admin identity hits the admin surface, its
//! session is revoked so the user is returned to a clean sign-in state
//! instead of a half-authenticated limbo. Revocations are keyed by the
//! token's `jti` and expire with the token itself.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, Client};

#[async_trait]
pub trait SessionRevocation: Send + Sync {
    async fn revoke(&self, token_jti: &str, expiry_seconds: i64) -> Result<(), anyhow::Error>;
    async fn is_revoked(&self, token_jti: &str) -> Result<bool, anyhow::Error>;
    async fn health_check(&self) -> Result<(), anyhow::Error>;
}

#[derive(Clone)]
pub struct RedisSessionStore {
    _client: Client,
    manager: ConnectionManager,
}

impl RedisSessionStore {
    pub async fn new(url: &str) -> Result<Self, anyhow::Error> {
        tracing::info!(url = %url, "Connecting to Redis");
        let client = Client::open(url.to_string())?;

        // Use ConnectionManager for automatic reconnection
        let manager = client.get_connection_manager().await.map_err(|e| {
            tracing::error!("Failed to get Redis connection manager: {}", e);
            anyhow::anyhow!("Failed to connect to Redis: {}", e)
        })?;

        tracing::info!("Successfully connected to Redis");

        Ok(Self {
            _client: client,
            manager,
        })
    }
}

/// In-memory revocation store for tests.
#[derive(Default)]
pub struct MockSessionStore {
    revoked: std::sync::Mutex<std::collections::HashSet<String>>,
}

#[async_trait]
impl SessionRevocation for MockSessionStore {
    async fn revoke(&self, token_jti: &str, _expiry_seconds: i64) -> Result<(), anyhow::Error> {
        self.revoked
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token_jti.to_string());
        Ok(())
    }

    async fn is_revoked(&self, token_jti: &str) -> Result<bool, anyhow::Error> {
        Ok(self
            .revoked
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(token_jti))
    }

    async fn health_check(&self) -> Result<(), anyhow::Error> {
        Ok(())
    }
}

#[async_trait]
impl SessionRevocation for RedisSessionStore {
    async fn revoke(&self, token_jti: &str, expiry_seconds: i64) -> Result<(), anyhow::Error> {
        let mut conn = self.manager.clone();
        let key = format!("revoked:{}", token_jti);

        redis::cmd("SET")
            .arg(&key)
            .arg("revoked")
            .arg("EX")
            .arg(expiry_seconds.max(1))
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to revoke session: {}", e))?;

        tracing::info!(jti = %token_jti, "Session revoked");
        Ok(())
    }

    async fn is_revoked(&self, token_jti: &str) -> Result<bool, anyhow::Error> {
        let mut conn = self.manager.clone();
        let key = format!("revoked:{}", token_jti);

        let exists: bool = redis::cmd("EXISTS")
            .arg(&key)
            .query_async(&mut conn)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to check session revocation: {}", e))?;

        Ok(exists)
    }

    async fn health_check(&self) -> Result<(), anyhow::Error> {
        let mut conn = self.manager.clone();
        redis::cmd("PING")
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| anyhow::anyhow!("Redis health check failed: {}", e))
    }
}
