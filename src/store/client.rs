use std::time::Instant;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};

use crate::config::CheckConfig;

use super::{StateStore, StoreError};

/// Redis-backed state store.
///
/// Nothing is opened until `fetch` runs. The connection lives only for that
/// call and is dropped on every return path, including when the caller's
/// deadline cancels the future.
pub struct RedisStore {
    client: Client,
    addr: String,
}

impl RedisStore {
    pub fn new(config: &CheckConfig) -> Result<Self, StoreError> {
        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(config.host.clone(), config.port),
            redis: RedisConnectionInfo::default(),
        };

        Ok(Self {
            client: Client::open(info)?,
            addr: config.addr(),
        })
    }

    async fn connect(&self) -> Result<MultiplexedConnection, StoreError> {
        tracing::debug!(addr = %self.addr, "Connecting to Redis");
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl StateStore for RedisStore {
    async fn fetch(&mut self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut connection = self.connect().await?;

        let started = Instant::now();
        let value: Option<Vec<u8>> = connection.get(key).await?;
        tracing::debug!(
            addr = %self.addr,
            key,
            found = value.is_some(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "GET completed"
        );

        drop(connection);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_does_not_connect() {
        // Port 1 on loopback is never listening; construction must still succeed
        let config = CheckConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            state_key: "last_mc_seqno".to_string(),
            max_delay_seconds: 300,
        };
        let store = RedisStore::new(&config).unwrap();
        assert_eq!(store.addr, "127.0.0.1:1");
    }

    #[tokio::test]
    async fn test_fetch_from_closed_port_is_redis_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = CheckConfig {
            host: "127.0.0.1".to_string(),
            port,
            state_key: "last_mc_seqno".to_string(),
            max_delay_seconds: 300,
        };
        let mut store = RedisStore::new(&config).unwrap();
        let err = store.fetch("last_mc_seqno").await.unwrap_err();
        assert!(matches!(err, StoreError::Redis(_)));
    }
}
