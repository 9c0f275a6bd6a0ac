//! 에코 팁, 성공 사례, 커뮤니티 행사

pub mod similarity;
pub mod content_service;

pub use content_service::ContentService;
