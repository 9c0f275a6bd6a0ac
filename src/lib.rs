//! ReLief 백엔드
//!
//! 개인 탄소 발자국을 기록하고 줄이도록 돕는 서비스의 API 서버입니다.
//! 하루 활동과 공과금 고지서로 배출량을 계산하고, 배지/연속 기록/카르마로
//! 참여를 유도하며, 커뮤니티 게시판과 AI 어시스턴트를 제공합니다.
//!
//! # Features
//!
//! - **배출량 계산**: 교통, 전력, 수도, 식단, 가전 카테고리별 kg CO2e
//! - **고지서 스캔**: Gemini로 전기/수도/가스 고지서 사용량 추출
//! - **참여 보상**: 배지 자동 지급, 카르마 포인트, 일일 체크인 연속 기록
//! - **커뮤니티**: 게시글, 그룹, 성공 사례, 행사
//! - **AI**: 친환경 어시스턴트 채팅, 팁 의미 검색
//! - **연동**: Supabase(PostgREST), Clerk(세션/웹훅), Resend(이메일), Redis(캐시)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, 서비스 조율
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (싱글톤)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────────────┐
//! │  Repositories   │     │ Clients (Clerk, Resend,  │
//! └─────────────────┘     │          Gemini)         │
//!          │              └──────────────────────────┘
//!          ▼
//! ┌─────────────────┐
//! │ Supabase + Redis│ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use relief_backend::services::carbon::ActivityService;
//! use relief_backend::services::badges::BadgeService;
//!
//! let activity = ActivityService::instance().log(&user_id, request).await?;
//! let awarded = BadgeService::instance().award_quietly(&user_id).await;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod clients;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
