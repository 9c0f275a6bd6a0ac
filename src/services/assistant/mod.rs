//! AI 어시스턴트

pub mod chat_service;

pub use chat_service::ChatService;
