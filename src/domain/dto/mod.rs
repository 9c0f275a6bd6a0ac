//! # Data Transfer Objects
//!
//! HTTP 요청 본문/쿼리와 응답 형태를 기능별로 정의합니다.
//! 요청 DTO는 `validator::Validate`로 형식/범위를 검증하고,
//! 핸들러는 서비스 호출 전에 `validate()`를 호출합니다.

pub mod common;
pub mod profiles;
pub mod activities;
pub mod bills;
pub mod badges;
pub mod streaks;
pub mod community;
pub mod content;
pub mod assistant;
pub mod admin;

pub use common::*;
pub use profiles::*;
pub use activities::*;
pub use bills::*;
pub use badges::*;
pub use streaks::*;
pub use community::*;
pub use content::*;
pub use assistant::*;
pub use admin::*;
