//! 로그인 기록 리포지토리 (`login_history`)

use chrono::NaiveDate;
use crate::core::errors::AppResult;
use crate::db::{PostgrestQuery, Resolution, SupabaseClient};
use crate::domain::entities::LoginRecord;
use crate::register_repository;

register_repository! {
    name = "login_history", table = "login_history",
    pub struct LoginHistoryRepository {
        client: SupabaseClient,
    }
}

impl LoginHistoryRepository {
    /// 하루 한 번만 기록됩니다. 오늘 처음 기록했으면 `true`
    pub async fn record(&self, user_id: &str, date: NaiveDate) -> AppResult<bool> {
        let row = LoginRecord { user_id: user_id.to_string(), login_date: date };
        let inserted: Vec<LoginRecord> = self.client
            .upsert(Self::TABLE, &[row], "user_id,login_date", Resolution::IgnoreDuplicates)
            .await?;

        Ok(!inserted.is_empty())
    }

    /// 최신순 로그인 날짜
    pub async fn find_dates(&self, user_id: &str) -> AppResult<Vec<NaiveDate>> {
        let query = PostgrestQuery::new()
            .select("user_id,login_date")
            .eq("user_id", user_id)
            .order("login_date", false);

        let rows: Vec<LoginRecord> = self.client.select(Self::TABLE, &query).await?;
        Ok(rows.into_iter().map(|row| row.login_date).collect())
    }
}
