//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 중앙에서 관리합니다.
//! 각 설정 구조체는 상태를 갖지 않는 정적 getter 모음이며, 호출 시점에 환경 변수를 읽습니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - Supabase(PostgREST), Redis 캐시 설정
//! - [`auth_config`] - Clerk 세션 검증, 웹훅 서명 설정
//! - [`integration_config`] - Resend 이메일, Gemini AI 설정
//! - [`emission_config`] - 배출 계수 재정의 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ### 필수 환경 변수
//!
//! ```bash
//! export SUPABASE_URL="https://xyzcompany.supabase.co"
//! export SUPABASE_SERVICE_ROLE_KEY="eyJhbGciOi..."
//! export CLERK_SECRET_KEY="sk_live_..."
//! export CLERK_JWT_PUBLIC_KEY="-----BEGIN PUBLIC KEY-----..."
//! export CLERK_WEBHOOK_SECRET="whsec_..."
//! export RESEND_API_KEY="re_..."
//! export GEMINI_API_KEY="AIza..."
//! ```
//!
//! ### 선택적 환경 변수
//!
//! ```bash
//! export ENVIRONMENT="production"      # development, test, staging, production
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export CORS_ALLOWED_ORIGINS="https://relief.app,http://localhost:3000"
//! export REDIS_URL="redis://localhost:6379"
//! export GRID_EMISSION_FACTOR="0.82"   # kg CO2e / kWh
//! ```

pub mod data_config;
pub mod auth_config;
pub mod integration_config;
pub mod emission_config;

pub use data_config::*;
pub use auth_config::*;
pub use integration_config::*;
pub use emission_config::*;

use std::env;
use crate::core::errors::{AppError, AppResult};

/// 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    pub fn current() -> Self {
        let value = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| env::var("PROFILE").unwrap_or_else(|_| "production".to_string()));

        Self::from_str(&value)
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// 필수 환경 변수를 읽습니다. 비어 있어도 누락으로 취급합니다.
pub(crate) fn required_var(name: &str) -> AppResult<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(AppError::InternalError(format!("{} must be set", name))),
    }
}

/// 환경 변수를 파싱하고, 없거나 파싱에 실패하면 기본값을 사용합니다.
pub(crate) fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// HTTP 서버 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        parsed_var("PORT", 8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    pub fn workers() -> usize {
        parsed_var("SERVER_WORKERS", 4).max(1)
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// 요청 속도 제한 설정 (`actix-governor`)
///
/// ```bash
/// RATE_LIMIT_PER_SECOND=20   # 토큰 보충 간격 기준 초당 요청 수
/// RATE_LIMIT_BURST_SIZE=40
/// ```
pub struct RateLimitConfig;

impl RateLimitConfig {
    pub fn per_second() -> u64 {
        parsed_var("RATE_LIMIT_PER_SECOND", 100u64).max(1)
    }

    pub fn burst_size() -> u32 {
        parsed_var("RATE_LIMIT_BURST_SIZE", 200u32).max(1)
    }
}

/// CORS 허용 오리진 설정
pub struct CorsConfig;

impl CorsConfig {
    /// `CORS_ALLOWED_ORIGINS` (쉼표 구분). 미설정 시 로컬 프론트엔드 개발 서버만 허용
    pub fn allowed_origins() -> Vec<String> {
        let raw = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

        Self::parse_origins(&raw)
    }

    pub fn parse_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|origin| origin.trim().trim_end_matches('/'))
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}
