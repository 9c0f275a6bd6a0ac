//! Clerk Backend API 클라이언트
//!
//! ```bash
//! export CLERK_SECRET_KEY="sk_live_..."
//! export CLERK_API_URL="https://api.clerk.com/v1"  # 기본값
//! ```

use std::time::Duration;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use crate::config::ClerkConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::models::clerk_webhook::ClerkUser;
use super::{header_value, vendor_error};

#[derive(Clone)]
pub struct ClerkClient {
    http: reqwest::Client,
    api_url: String,
}

impl ClerkClient {
    pub fn new() -> AppResult<Self> {
        let secret_key = ClerkConfig::secret_key()?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", secret_key))?);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()
            .context("Clerk HTTP 클라이언트 생성 실패")?;

        Ok(Self {
            http,
            api_url: ClerkConfig::api_url(),
        })
    }

    fn user_url(&self, user_id: &str) -> String {
        format!("{}/users/{}", self.api_url, urlencoding::encode(user_id))
    }

    /// `GET /users/{id}`
    pub async fn get_user(&self, user_id: &str) -> AppResult<ClerkUser> {
        let response = self.http
            .get(self.user_url(user_id))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Clerk 사용자 조회 요청 실패: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("Clerk 사용자 {}", user_id)));
        }
        if !response.status().is_success() {
            return Err(vendor_error("Clerk", "사용자 조회", response).await);
        }

        response
            .json::<ClerkUser>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Clerk 사용자 응답 파싱 실패: {}", e)))
    }

    /// `DELETE /users/{id}`. 이미 삭제된 사용자는 성공으로 취급합니다.
    pub async fn delete_user(&self, user_id: &str) -> AppResult<()> {
        let response = self.http
            .delete(self.user_url(user_id))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Clerk 사용자 삭제 요청 실패: {}", e)))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => {
                log::warn!("Clerk 사용자 {}는 이미 삭제되었습니다", user_id);
                Ok(())
            }
            _ => Err(vendor_error("Clerk", "사용자 삭제", response).await),
        }
    }
}
