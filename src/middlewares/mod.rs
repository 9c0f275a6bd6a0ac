//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer <Clerk 세션 JWT>` 추출 및 검증
//! - 검증된 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)를
//!   request extension에 저장
//! - 필수/선택 인증 모드와 역할 요구 지원
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::middlewares::AuthMiddleware;
//!
//! cfg.service(
//!     web::scope("/api/v1/activities")
//!         .wrap(AuthMiddleware::required())
//!         .service(handlers::activities::log_activity),
//! )
//! .service(
//!     web::scope("/api/v1/admin")
//!         .wrap(AuthMiddleware::required_with_role("admin"))
//!         .service(handlers::admin::create_tip),
//! );
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
