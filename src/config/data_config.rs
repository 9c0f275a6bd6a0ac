//! 데이터 계층 설정
//!
//! Supabase PostgREST 엔드포인트와 Redis 캐시 관련 설정입니다.

use std::env;
use crate::core::errors::AppResult;
use super::{parsed_var, required_var};

/// Supabase(PostgREST) 설정
pub struct SupabaseConfig;

impl SupabaseConfig {
    /// 프로젝트 URL (`https://<ref>.supabase.co`), 끝의 `/`는 제거
    pub fn url() -> AppResult<String> {
        Ok(required_var("SUPABASE_URL")?.trim_end_matches('/').to_string())
    }

    /// 서비스 롤 키. RLS를 우회하므로 서버에서만 사용합니다.
    pub fn service_role_key() -> AppResult<String> {
        required_var("SUPABASE_SERVICE_ROLE_KEY")
    }

    /// PostgREST 스키마 (`Accept-Profile` / `Content-Profile` 헤더)
    pub fn schema() -> String {
        env::var("SUPABASE_SCHEMA").unwrap_or_else(|_| "public".to_string())
    }

    pub fn timeout_secs() -> u64 {
        parsed_var("SUPABASE_TIMEOUT_SECS", 15)
    }

    /// `{url}/rest/v1`
    pub fn rest_url() -> AppResult<String> {
        Ok(format!("{}/rest/v1", Self::url()?))
    }
}

/// Redis 캐시 설정
pub struct CacheConfig;

impl CacheConfig {
    pub fn redis_url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// 리더보드 캐시 TTL (초)
    pub fn leaderboard_ttl_secs() -> usize {
        parsed_var("LEADERBOARD_CACHE_TTL_SECS", 300)
    }

    /// 팁 임베딩 캐시 TTL (초)
    pub fn embedding_ttl_secs() -> usize {
        parsed_var("EMBEDDING_CACHE_TTL_SECS", 7 * 24 * 3600)
    }

    /// 공개 프로필 캐시 TTL (초)
    pub fn profile_ttl_secs() -> usize {
        parsed_var("PROFILE_CACHE_TTL_SECS", 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_defaults() {
        if env::var("LEADERBOARD_CACHE_TTL_SECS").is_err() {
            assert_eq!(CacheConfig::leaderboard_ttl_secs(), 300);
        }
        if env::var("REDIS_URL").is_err() {
            assert_eq!(CacheConfig::redis_url(), "redis://localhost:6379");
        }
    }

    #[test]
    fn test_schema_default() {
        if env::var("SUPABASE_SCHEMA").is_err() {
            assert_eq!(SupabaseConfig::schema(), "public");
        }
    }
}
