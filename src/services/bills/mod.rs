//! 고지서 스캔 서비스

pub mod bill_service;

pub use bill_service::BillService;
