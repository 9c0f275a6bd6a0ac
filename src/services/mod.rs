//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! `#[service]` 매크로로 싱글톤이 되는 서비스들을 기능별로 제공합니다.
//! 서비스는 리포지토리와 외부 클라이언트만 주입받고, 서로를 참조하지 않습니다.
//! 여러 서비스를 잇는 흐름(활동 기록 후 배지 확인, 웹훅 후 환영 메일 등)은 핸들러가 조합합니다.
//!
//! # Modules
//!
//! - [`auth`] - Clerk 세션 JWT 검증, Svix 웹훅 서명 검증
//! - [`carbon`] - 배출량 계산, 활동 기록, 기간 요약
//! - [`badges`] - 배지 판정과 지급
//! - [`streaks`] - 일일 체크인과 연속 접속일
//! - [`profiles`] - 프로필, 리더보드
//! - [`community`] - 게시글, 그룹
//! - [`content`] - 팁(의미 검색), 성공 사례, 행사
//! - [`bills`] - 고지서 스캔
//! - [`assistant`] - AI 상담
//! - [`notifications`] - 이메일
//! - [`exports`] - CSV 내보내기
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::carbon::ActivityService;
//!
//! let activity = ActivityService::instance().log(&user.user_id, request).await?;
//! ```

pub mod auth;
pub mod carbon;
pub mod badges;
pub mod streaks;
pub mod profiles;
pub mod community;
pub mod content;
pub mod bills;
pub mod assistant;
pub mod notifications;
pub mod exports;
