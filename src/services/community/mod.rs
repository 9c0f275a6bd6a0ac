//! 커뮤니티 서비스 (게시글, 그룹)

pub mod community_service;

pub use community_service::CommunityService;
