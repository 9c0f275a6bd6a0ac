//! Redis 캐시 클라이언트
//!
//! 리더보드, 공개 프로필, 팁 임베딩처럼 다시 계산 가능한 값만 저장합니다.
//! 캐시는 보조 수단이므로 Redis에 연결할 수 없으면 비활성 모드로 동작하고,
//! 모든 조회는 미스로, 모든 저장은 무시로 처리됩니다.

use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use crate::config::CacheConfig;

#[derive(Clone)]
pub struct RedisClient {
    /// `None`이면 비활성 캐시
    client: Option<Client>,
}

impl RedisClient {
    /// `REDIS_URL`로 연결하고 PING으로 가용성을 확인합니다.
    pub async fn new() -> Result<Self, redis::RedisError> {
        let client = Client::open(CacheConfig::redis_url())?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { client: Some(client) })
    }

    /// 연결에 실패하면 비활성 캐시로 대체합니다.
    pub async fn connect_or_disabled() -> Self {
        match Self::new().await {
            Ok(client) => client,
            Err(e) => {
                log::warn!("⚠️ Redis 연결 실패, 캐시 없이 실행합니다: {}", e);
                Self::disabled()
            }
        }
    }

    /// 아무 요청도 보내지 않는 비활성 캐시
    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let Some(client) = &self.client else {
            return Ok(None);
        };

        let mut conn = client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let deserialized = serde_json::from_str(&json)
                    .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Deserialization failed", e.to_string())))?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: usize) -> Result<(), redis::RedisError> {
        let Some(client) = &self.client else {
            return Ok(());
        };

        let mut conn = client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;
        conn.set_ex(key, json, seconds as u64).await
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let Some(client) = &self.client else {
            return Ok(());
        };

        let mut conn = client.get_multiplexed_async_connection().await?;
        conn.del(key).await
    }

    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        let Some(client) = &self.client else {
            return Ok(());
        };
        if keys.is_empty() {
            return Ok(());
        }

        let mut conn = client.get_multiplexed_async_connection().await?;
        conn.del(keys).await
    }
}

/// 캐시 키 모음
pub mod keys {
    /// 최대 크기 리더보드 하나만 캐시하고, 요청 limit은 잘라서 응답합니다.
    pub fn leaderboard() -> String {
        "relief:leaderboard".to_string()
    }

    pub fn public_profile(user_id: &str) -> String {
        format!("relief:profile:{}", user_id)
    }

    pub fn tip_embedding(tip_id: &str, model: &str) -> String {
        format!("relief:embedding:{}:{}", model, tip_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_disabled_cache_is_a_no_op() {
        let cache = RedisClient::disabled();
        assert!(!cache.is_available());

        cache.set_with_expiry("k", &42u32, 60).await.unwrap();
        let value: Option<u32> = cache.get("k").await.unwrap();
        assert_eq!(value, None);
        cache.del_multiple(&[keys::leaderboard()]).await.unwrap();
    }

    #[test]
    fn test_cache_keys_are_namespaced() {
        assert_eq!(keys::leaderboard(), "relief:leaderboard");
        assert_eq!(keys::public_profile("user_1"), "relief:profile:user_1");
        assert_eq!(
            keys::tip_embedding("t1", "text-embedding-004"),
            "relief:embedding:text-embedding-004:t1"
        );
    }
}
