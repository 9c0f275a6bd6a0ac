//! # Domain Models Module
//!
//! 테이블 행이 아닌 도메인 모델을 정의합니다.
//!
//! - [`emissions`]: 배출량 계산 입력/출력과 계수 테이블
//! - [`user_stats`]: 배지 평가에 쓰이는 사용자 통계 스냅샷
//! - [`bill_extraction`]: Gemini가 고지서 이미지에서 추출한 값과 단위 정규화
//! - [`auth`]: Clerk 세션 클레임과 요청별 인증 컨텍스트
//! - [`clerk_webhook`]: Clerk 웹훅 이벤트 페이로드

pub mod emissions;
pub mod user_stats;
pub mod bill_extraction;
pub mod auth;
pub mod clerk_webhook;

pub use emissions::*;
pub use user_stats::*;
pub use bill_extraction::*;
pub use auth::*;
pub use clerk_webhook::*;
