//! # Domain Entities Module
//!
//! Supabase 테이블 행과 1:1로 대응하는 구조체를 정의합니다.
//! 행 자체는 외부 Postgres에 있고, 이 모듈은 PostgREST JSON의 Rust 형태만 소유합니다.
//!
//! ```text
//! Domain Layer
//! ├── entities/     ← 이 모듈 (테이블 행)
//! ├── models/       ← 계산 모델, 인증 컨텍스트, 외부 API 페이로드
//! └── dto/          ← HTTP 요청/응답
//! ```
//!
//! 각 엔티티는 조회용 구조체(`Profile`)와 삽입용 구조체(`NewProfile`)를 쌍으로 가집니다.
//! 삽입용 구조체에는 데이터베이스가 채우는 `id`, `created_at` 같은 컬럼이 없습니다.

pub mod profile;
pub mod activity;
pub mod bill;
pub mod badge;
pub mod post;
pub mod group;
pub mod login_history;
pub mod content;

pub use profile::*;
pub use activity::*;
pub use bill::*;
pub use badge::*;
pub use post::*;
pub use group::*;
pub use login_history::*;
pub use content::*;
