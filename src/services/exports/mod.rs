//! CSV 내보내기

pub mod export_service;

pub use export_service::ExportService;
