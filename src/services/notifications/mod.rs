//! 이메일 알림 (Resend)

pub mod templates;
pub mod email_service;

pub use email_service::EmailService;
