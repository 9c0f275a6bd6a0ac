//! # Core Framework Module
//!
//! 서비스 전반이 공유하는 핵심 기반 기능입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 타입 기반 싱글톤 컨테이너
//! - **자동 레지스트리**: `inventory` 기반 서비스/리포지토리 수집
//! - **register_repository!**: Supabase 테이블 리포지토리 선언 매크로
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use singleton_macro::service;
//!
//! register_repository! {
//!     name = "activity", table = "activities",
//!     pub struct ActivityRepository {
//!         client: SupabaseClient,
//!     }
//! }
//!
//! #[service(name = "activity")]
//! pub struct ActivityService {
//!     activity_repo: Arc<ActivityRepository>, // 자동 주입
//! }
//!
//! let service = ActivityService::instance();
//! ```
//!
//! ## 트러블슈팅
//!
//! ### 미등록 타입 에러
//! ```text
//! panic: Failed to create instance for relief_backend::db::SupabaseClient: SupabaseClient is not registered
//! ```
//! **해결**: `main`에서 `ServiceLocator::set()`으로 인프라 컴포넌트를 먼저 등록

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
