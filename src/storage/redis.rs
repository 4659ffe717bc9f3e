// src/storage/redis.rs

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::{CounterError, Result, StorageError};
use crate::storage::{validate_key, CounterStore};
use crate::store_op;

/// Redis-backed counter store.
///
/// Construction never touches the network. The connection is established by
/// the first command and then shared by every clone of the store; the
/// underlying `ConnectionManager` multiplexes concurrent requests and
/// re-establishes itself after the link drops.
pub struct RedisStore {
    client: Client,
    connection: Arc<OnceCell<ConnectionManager>>,
    config: StoreConfig,
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("connected", &self.connection.initialized())
            .finish()
    }
}

impl Clone for RedisStore {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            connection: Arc::clone(&self.connection),
            config: self.config.clone(),
        }
    }
}

impl RedisStore {
    /// Creates a client for the store at `config.host:config.port`.
    ///
    /// An empty or unresolvable host is accepted here and surfaces as a
    /// connection error on first use.
    pub fn connect(config: StoreConfig) -> Result<Self> {
        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(config.host.clone(), config.port),
            redis: RedisConnectionInfo::default(),
        };
        let client = Client::open(info)?;

        debug!(host = %config.host, port = config.port, "Redis client created");

        Ok(Self {
            client,
            connection: Arc::new(OnceCell::new()),
            config,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the shared connection, establishing it if this is the first use.
    ///
    /// Callers that find no connection each dial on their own, so a slow or
    /// silent store never makes one request wait out another's attempt. A
    /// failed attempt leaves the cell empty; the first success is kept.
    async fn connection(&self) -> Result<ConnectionManager> {
        if let Some(manager) = self.connection.get() {
            return Ok(manager.clone());
        }

        let manager = self.open().await?;
        if self.connection.set(manager.clone()).is_err() {
            // Another request connected first; share its connection.
            if let Some(existing) = self.connection.get() {
                return Ok(existing.clone());
            }
        }

        Ok(manager)
    }

    async fn open(&self) -> Result<ConnectionManager> {
        // Reconnect attempts belong to the caller's retry policy, not the manager.
        let manager_config = ConnectionManagerConfig::new()
            .set_number_of_retries(0)
            .set_connection_timeout(self.config.connection_timeout)
            .set_response_timeout(self.config.response_timeout);

        let connecting = ConnectionManager::new_with_config(self.client.clone(), manager_config);

        match tokio::time::timeout(self.config.connection_timeout, connecting).await {
            Ok(result) => {
                let manager = result.map_err(StorageError::from)?;
                info!(host = %self.config.host, port = self.config.port, "Connected to Redis");
                Ok(manager)
            }
            Err(_) => Err(CounterError::Storage(StorageError::Connection(format!(
                "Connection to Redis at {}:{} timed out after {:?}",
                self.config.host, self.config.port, self.config.connection_timeout
            )))),
        }
    }
}

#[async_trait]
impl CounterStore for RedisStore {
    async fn increment_by(&self, key: &str, amount: i64) -> Result<i64> {
        validate_key(key)?;
        let start = Instant::now();

        let result: Result<i64> = async {
            let mut conn = self.connection().await?;
            let value: i64 = conn.incr(key, amount).await?;
            Ok(value)
        }
        .await;

        store_op!("incrby", key, result, start.elapsed().as_millis() as u64);
        result
    }

    async fn get(&self, key: &str) -> Result<Option<i64>> {
        validate_key(key)?;
        let start = Instant::now();

        let result: Result<Option<i64>> = async {
            let mut conn = self.connection().await?;
            let value: Option<i64> = conn.get(key).await?;
            Ok(value)
        }
        .await;

        store_op!("get", key, result, start.elapsed().as_millis() as u64);
        result
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let reply: String = redis::AsyncCommands::ping::<String>(&mut conn).await?;

        if reply == "PONG" {
            Ok(())
        } else {
            Err(StorageError::Command(format!(
                "Unexpected response from Redis PING: {}",
                reply
            ))
            .into())
        }
    }
}
