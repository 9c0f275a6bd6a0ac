//! 인증 관련 서비스
//!
//! - [`SessionService`]: Clerk 세션 JWT 검증 (미들웨어에서 사용)
//! - [`WebhookService`]: Clerk(Svix) 웹훅 서명 검증

pub mod session_service;
pub mod webhook_service;

pub use session_service::SessionService;
pub use webhook_service::{SvixHeaders, WebhookService};
