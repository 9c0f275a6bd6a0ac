//! # Application Error Handling System
//!
//! ReLief 백엔드 전역에서 사용하는 통합 에러 처리 시스템입니다.
//! 모든 계층(리포지토리, 외부 API 클라이언트, 서비스, 핸들러)은 [`AppError`]를
//! 반환하며, Actix-Web의 `ResponseError` 구현을 통해 일관된 JSON 응답으로 변환됩니다.
//!
//! ## 사용 패턴
//!
//! ### 서비스 계층에서의 에러 처리
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! impl ActivityService {
//!     pub async fn delete(&self, user_id: &str, id: Uuid) -> Result<(), AppError> {
//!         let deleted = self.activity_repo.delete_owned(user_id, id).await?;
//!         if !deleted {
//!             return Err(AppError::NotFound("활동 기록을 찾을 수 없습니다".to_string()));
//!         }
//!         Ok(())
//!     }
//! }
//! ```
//!
//! ### 핸들러에서의 에러 처리
//!
//! ```rust,ignore
//! #[post("")]
//! async fn log_activity(
//!     user: AuthenticatedUser,
//!     payload: web::Json<LogActivityRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     let activity = ActivityService::instance()
//!         .log(&user.user_id, payload.into_inner())
//!         .await?; // 자동으로 적절한 HTTP 응답으로 변환됨
//!     Ok(HttpResponse::Created().json(activity))
//! }
//! ```
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 입력값 검증 실패 |
//! | `NotFound` | 404 Not Found | 리소스 없음 |
//! | `ConflictError` | 409 Conflict | 중복 데이터 (유니크 제약 위반) |
//! | `AuthenticationError` | 401 Unauthorized | 세션 토큰 없음/만료/서명 오류 |
//! | `AuthorizationError` | 403 Forbidden | 권한 부족 |
//! | `ExternalServiceError` | 502 Bad Gateway | Clerk, Resend, Gemini 호출 실패 |
//! | `DatabaseError` | 500 Internal Server Error | Supabase(PostgREST) 오류 |
//! | `RedisError` | 500 Internal Server Error | 캐시 오류 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// `thiserror`로 `Error` trait을 구현하고, `actix_web::ResponseError`를 구현하여
/// 핸들러에서 `?` 연산자만으로 HTTP 응답까지 변환됩니다.
///
/// ## 에러 카테고리
///
/// - **인프라**: `DatabaseError`, `RedisError`, `ExternalServiceError`
/// - **비즈니스**: `ValidationError`, `ConflictError`, `NotFound`
/// - **보안**: `AuthenticationError`, `AuthorizationError`
/// - **시스템**: `InternalError`
#[derive(Error, Debug)]
pub enum AppError {
    /// Supabase(PostgREST) 호출 실패 또는 응답 디코딩 실패
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 연산 실패
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 클라이언트 입력값이 형식/범위 요구사항을 만족하지 않음
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 요청된 리소스가 존재하지 않거나 요청자 소유가 아님
    #[error("Not found: {0}")]
    NotFound(String),

    /// 유니크 제약 위반 등 현재 상태와 충돌
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 세션 토큰 누락, 만료, 서명 불일치, 웹훅 서명 불일치
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 인증은 되었으나 필요한 역할이 없음
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// Clerk, Resend, Gemini 등 외부 API 호출 실패
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 예상하지 못한 시스템 오류
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 에러에 대응하는 HTTP 상태 코드
    pub fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let status = AppError::status_code(self);

        if status.is_server_error() {
            log::error!("요청 처리 실패 ({}): {}", status.as_u16(), self);
        }

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

/// 애플리케이션 결과 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 임의의 `Result`에 컨텍스트 메시지를 붙여 [`AppError::InternalError`]로 변환하는 확장 trait
///
/// ```rust,ignore
/// let body = serde_json::to_string(&payload).context("요청 본문 직렬화 실패")?;
/// ```
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("meals must be at most 10".to_string());
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("Activity not found".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("duplicate key".to_string());
        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Invalid session".to_string());
        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("admin only".to_string());
        assert_eq!(error.error_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_external_service_error_maps_to_bad_gateway() {
        let error = AppError::ExternalServiceError("Gemini timeout".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_internal_error_response() {
        let error = AppError::DatabaseError("connection refused".to_string());
        assert_eq!(error.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        match app_result {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.contains("Additional context"));
                assert!(msg.contains("original error"));
            }
            _ => panic!("Expected InternalError"),
        }
    }

    #[test]
    fn test_error_with_context_is_lazy_on_success() {
        let result: Result<u8, &str> = Ok(7);
        let value = result.with_context(|| panic!("must not be evaluated")).unwrap();
        assert_eq!(value, 7);
    }
}
