//! AuthMiddleware 인증 로직
use std::rc::Rc;
use std::sync::Arc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::auth::{AuthMode, AuthenticatedUser, RequiredRole};
use crate::services::auth::SessionService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub required_role: Option<RequiredRole>,
    pub session: Arc<SessionService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();
        let required_role = self.required_role.clone();
        let session = self.session.clone();

        Box::pin(async move {
            let user = match (authenticate(&req, &session), &mode) {
                (Ok(user), _) => Some(user),
                (Err(err), AuthMode::Required) => {
                    log::warn!("🔒 인증 실패: {} {} ({})", req.method(), req.path(), err);
                    return Ok(reject(req, err));
                }
                (Err(_), AuthMode::Optional) => None,
            };

            if let Some(user) = user {
                let permitted = required_role
                    .as_ref()
                    .is_none_or(|required| required.is_satisfied(&user.roles));

                match (permitted, &mode) {
                    (true, _) => {
                        log::debug!("인증 성공: {} ({:?})", user.user_id, user.roles);
                        req.extensions_mut().insert(user);
                    }
                    (false, AuthMode::Required) => {
                        log::warn!("🚫 권한 부족: {} ({:?}), 필요 역할: {:?}",
                            user.user_id, user.roles, required_role);
                        let err = AppError::AuthorizationError("접근 권한이 부족합니다".to_string());
                        return Ok(reject(req, err));
                    }
                    // 선택 인증에서 역할이 맞지 않으면 익명으로 진행
                    (false, AuthMode::Optional) => {}
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 요청을 핸들러로 넘기지 않고 `AppError` 응답으로 끝냅니다.
fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, err.error_response()).map_into_right_body()
}

/// `Authorization` 헤더의 세션 토큰을 검증합니다.
fn authenticate(req: &ServiceRequest, session: &SessionService) -> AppResult<AuthenticatedUser> {
    let header = req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = SessionService::extract_bearer_token(header)?;
    session.verify(token)
}
