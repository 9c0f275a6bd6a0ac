//! 연속 접속 서비스 모듈

pub mod streak_calculator;
pub mod streak_service;

pub use streak_service::StreakService;
