pub mod badge_repository;
pub mod user_badge_repository;

pub use badge_repository::BadgeRepository;
pub use user_badge_repository::UserBadgeRepository;
