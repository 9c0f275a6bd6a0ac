//! # HTTP Request Handlers Module
//!
//! 요청 추출(`AuthenticatedUser`, `web::Json`, `web::Query`), 입력 검증,
//! 서비스 호출, 응답 조립만 담당합니다. 여러 서비스를 엮는 흐름
//! (활동 기록 후 배지 지급 등)도 핸들러에서 조율합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (ReLief Web/Mobile)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈)                 ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직            ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - PostgREST 테이블     ← Repository Layer
//! ├─────────────────────────────────────────────┤
//!   Clients - Clerk, Resend, Gemini    ← Integration Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! | 모듈 | 스코프 | 인증 |
//! |------|--------|------|
//! | [`profiles`] | `/me`, `/profiles`, `/leaderboard` | 필수 / 공개 |
//! | [`activities`] | `/activities` | 필수 |
//! | [`bills`] | `/bills` | 필수 |
//! | [`badges`] | `/badges` | 혼합 |
//! | [`streaks`] | `/streaks` | 필수 |
//! | [`community`] | `/posts`, `/groups` | 필수 |
//! | [`content`] | `/tips`, `/stories`, `/events` | 혼합 |
//! | [`assistant`] | `/assistant` | 필수 |
//! | [`exports`] | `/exports` | 필수 |
//! | [`admin`] | `/admin` | `admin` 역할 |
//! | [`webhooks`] | `/webhooks` | Svix 서명 |
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며,
//! `AppError`의 `ResponseError` 구현이 `{ "error": "..." }` 본문과 상태 코드를 만듭니다.
//!
//! ```rust,ignore
//! #[post("")]
//! pub async fn log_activity(
//!     user: AuthenticatedUser,
//!     payload: web::Json<LogActivityRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     let activity = ActivityService::instance().log(&user.user_id, payload.into_inner()).await?;
//!     let awarded_badges = BadgeService::instance().award_quietly(&user.user_id).await;
//!     Ok(HttpResponse::Created().json(LogActivityResponse { activity, awarded_badges }))
//! }
//! ```

pub mod profiles;
pub mod activities;
pub mod bills;
pub mod badges;
pub mod streaks;
pub mod community;
pub mod content;
pub mod assistant;
pub mod exports;
pub mod admin;
pub mod webhooks;
