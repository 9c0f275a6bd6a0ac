//! # Domain Layer Module
//!
//! ReLief 도메인 타입을 세 계층으로 나눕니다.
//!
//! - [`entities`]: Supabase 테이블 행
//! - [`models`]: 배출량 계산 모델, 사용자 통계, 인증 컨텍스트, 외부 페이로드
//! - [`dto`]: HTTP 요청/응답

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
