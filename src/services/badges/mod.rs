//! 배지 서비스 모듈
//!
//! - [`evaluator`] - 통계 스냅샷 기준 획득 판정 (순수 함수)
//! - [`badge_service`] - 통계 수집, 배치 지급, Karma 적립

pub mod evaluator;
pub mod badge_service;

pub use badge_service::BadgeService;
