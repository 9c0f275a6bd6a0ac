//! 탄소 배출 계산 서비스 모듈
//!
//! - [`calculator`] - 하루 활동 → 카테고리별 배출량 (순수 함수)
//! - [`summary`] - 기간 합계와 일별 시계열
//! - [`activity_service`] - 활동 기록 저장/조회/삭제

pub mod calculator;
pub mod summary;
pub mod activity_service;

pub use activity_service::ActivityService;
