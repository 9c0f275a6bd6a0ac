//! 인증된 사용자 컨텍스트
//!
//! [`AuthMiddleware`](crate::middlewares::AuthMiddleware)가 Clerk 세션 토큰을 검증한 뒤
//! 요청 extensions에 넣어 두고, 핸들러는 추출자로 꺼내 씁니다.
//!
//! ```rust,ignore
//! #[get("")]
//! pub async fn get_me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
//!     let profile = ProfileService::instance().get_or_provision(&user.user_id).await?;
//!     Ok(HttpResponse::Ok().json(profile))
//! }
//! ```

use std::future::{ready, Ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::core::errors::AppError;

/// 기본 역할 (모든 인증 사용자)
pub const ROLE_USER: &str = "user";

/// 관리자 역할 (세션 클레임 `metadata.role == "admin"`)
pub const ROLE_ADMIN: &str = "admin";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Clerk 사용자 ID (`sub` 클레임)
    pub user_id: String,

    /// Clerk 세션 ID (`sid` 클레임)
    pub session_id: Option<String>,

    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|&role| self.has_role(role))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string(),
            ))),
        }
    }
}

/// 인증이 선택인 엔드포인트용 추출자
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn user(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "user_2abc".to_string(),
            session_id: Some("sess_1".to_string()),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_role_checks() {
        let admin = user(&[ROLE_USER, ROLE_ADMIN]);
        assert!(admin.is_admin());
        assert!(admin.has_any_role(&["moderator", ROLE_ADMIN]));

        let member = user(&[ROLE_USER]);
        assert!(!member.is_admin());
        assert!(!member.has_any_role(&["moderator", ROLE_ADMIN]));
    }

    #[actix_web::test]
    async fn test_extractor_reads_request_extensions() {
        let req = TestRequest::default().to_http_request();
        let missing = AuthenticatedUser::extract(&req).await;
        assert!(matches!(missing, Err(AppError::AuthenticationError(_))));

        req.extensions_mut().insert(user(&[ROLE_USER]));
        let found = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(found.user_id, "user_2abc");

        let optional = OptionalUser::extract(&req).await.unwrap();
        assert!(optional.0.is_some());
    }
}
