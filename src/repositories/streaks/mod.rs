pub mod login_history_repository;

pub use login_history_repository::LoginHistoryRepository;
