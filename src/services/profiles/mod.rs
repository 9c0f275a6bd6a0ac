//! 프로필과 리더보드 서비스

pub mod profile_service;
pub mod leaderboard_service;

pub use profile_service::ProfileService;
pub use leaderboard_service::LeaderboardService;
