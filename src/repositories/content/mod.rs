pub mod story_repository;
pub mod tip_repository;
pub mod event_repository;

pub use story_repository::StoryRepository;
pub use tip_repository::TipRepository;
pub use event_repository::EventRepository;
