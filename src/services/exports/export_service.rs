//! 본인 기록 CSV 내보내기

use std::sync::Arc;
use singleton_macro::service;
use crate::core::errors::AppResult;
use crate::domain::entities::{ActivityCsvRow, BillCsvRow};
use crate::repositories::activities::ActivityRepository;
use crate::repositories::bills::BillRepository;
use crate::utils::csv_export::to_csv;

#[service(name = "export")]
pub struct ExportService {
    activity_repo: Arc<ActivityRepository>,
    bill_repo: Arc<BillRepository>,
}

impl ExportService {
    pub async fn activities_csv(&self, user_id: &str) -> AppResult<String> {
        let activities = self.activity_repo.find_all_by_user(user_id).await?;
        let rows: Vec<ActivityCsvRow> = activities.iter().map(ActivityCsvRow::from).collect();

        log::info!("📤 활동 CSV 내보내기: user={} rows={}", user_id, rows.len());
        to_csv(&rows)
    }

    pub async fn bills_csv(&self, user_id: &str) -> AppResult<String> {
        let bills = self.bill_repo.find_by_user(user_id, None, 0).await?;
        let rows: Vec<BillCsvRow> = bills.iter().map(BillCsvRow::from).collect();

        log::info!("📤 고지서 CSV 내보내기: user={} rows={}", user_id, rows.len());
        to_csv(&rows)
    }
}
