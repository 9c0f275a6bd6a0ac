//! Clerk 세션 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 세션 토큰을 검증하고 사용자 정보를 추출합니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::models::auth::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;
use crate::services::auth::SessionService;

/// 세션 인증 미들웨어
pub struct AuthMiddleware {
    /// 인증 모드 (Required/Optional)
    mode: AuthMode,
    /// 접근에 필요한 역할 (선택사항)
    required_role: Option<RequiredRole>,
    /// 지정하지 않으면 전역 [`SessionService`] 사용
    session: Option<Arc<SessionService>>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
            session: None,
        }
    }

    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
            session: None,
        }
    }

    /// 필수 인증
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 선택적 인증. 토큰이 없거나 유효하지 않아도 요청을 진행합니다.
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    /// 특정 역할 요구
    pub fn required_with_role(role: &str) -> Self {
        Self::new_with_role(
            AuthMode::Required,
            RequiredRole::Single(role.to_string())
        )
    }

    /// 복수 역할 중 하나 요구
    pub fn required_with_roles(roles: Vec<&str>) -> Self {
        let role_strings: Vec<String> = roles.into_iter().map(|s| s.to_string()).collect();
        Self::new_with_role(
            AuthMode::Required,
            RequiredRole::Any(role_strings)
        )
    }

    /// 검증에 사용할 세션 서비스를 지정합니다.
    pub fn with_session(mut self, session: Arc<SessionService>) -> Self {
        self.session = Some(session);
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role.clone(),
            session: self.session.clone().unwrap_or_else(SessionService::instance),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{get, test, App, HttpResponse};
    use chrono::Utc;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use crate::domain::models::auth::{ClerkSessionClaims, OptionalUser, SessionMetadata};

    const PRIVATE_KEY: &str = include_str!("../services/auth/testdata/session_test_private.pem");
    const PUBLIC_KEY: &str = include_str!("../services/auth/testdata/session_test_public.pem");

    fn session() -> Arc<SessionService> {
        Arc::new(SessionService::with_public_key(PUBLIC_KEY, vec![], 5).unwrap())
    }

    fn token(role: Option<&str>) -> String {
        let now = Utc::now().timestamp();
        let claims = ClerkSessionClaims {
            sub: "user_2abc".to_string(),
            sid: None,
            azp: None,
            exp: now + 300,
            nbf: Some(now - 10),
            iat: Some(now - 10),
            metadata: role.map(|r| SessionMetadata { role: Some(r.to_string()) }),
        };
        let key = EncodingKey::from_rsa_pem(PRIVATE_KEY.as_bytes()).unwrap();
        encode(&Header::new(Algorithm::RS256), &claims, &key).unwrap()
    }

    #[get("/whoami")]
    async fn whoami(user: OptionalUser) -> HttpResponse {
        match user.0 {
            Some(user) => HttpResponse::Ok().body(user.user_id),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    #[actix_web::test]
    async fn test_required_mode_rejects_missing_token() {
        let app = test::init_service(
            App::new().service(
                actix_web::web::scope("")
                    .wrap(AuthMiddleware::required().with_session(session()))
                    .service(whoami),
            ),
        )
        .await;

        let response = test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(response.status(), 401);
    }

    #[actix_web::test]
    async fn test_required_mode_accepts_valid_token() {
        let app = test::init_service(
            App::new().service(
                actix_web::web::scope("")
                    .wrap(AuthMiddleware::required().with_session(session()))
                    .service(whoami),
            ),
        )
        .await;

        let request = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token(None))))
            .to_request();
        let body = test::call_and_read_body(&app, request).await;

        assert_eq!(body, "user_2abc");
    }

    #[actix_web::test]
    async fn test_role_requirement_returns_forbidden() {
        let app = test::init_service(
            App::new().service(
                actix_web::web::scope("")
                    .wrap(AuthMiddleware::required_with_role("admin").with_session(session()))
                    .service(whoami),
            ),
        )
        .await;

        let member = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token(None))))
            .to_request();
        assert_eq!(test::call_service(&app, member).await.status(), 403);

        let admin = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token(Some("admin")))))
            .to_request();
        assert_eq!(test::call_service(&app, admin).await.status(), 200);
    }

    #[actix_web::test]
    async fn test_optional_mode_lets_anonymous_through() {
        let app = test::init_service(
            App::new().service(
                actix_web::web::scope("")
                    .wrap(AuthMiddleware::optional().with_session(session()))
                    .service(whoami),
            ),
        )
        .await;

        let anonymous = test::TestRequest::get().uri("/whoami").to_request();
        assert_eq!(test::call_and_read_body(&app, anonymous).await, "anonymous");

        let garbage = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request();
        assert_eq!(test::call_and_read_body(&app, garbage).await, "anonymous");
    }
}
