//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리, 이스케이프, 코드 펜스 제거
//! - [`display_terminal`] - 시작 화면 터미널 출력
//! - [`csv_export`] - CSV 직렬화 헬퍼

pub mod string_utils;
pub mod display_terminal;
pub mod csv_export;
