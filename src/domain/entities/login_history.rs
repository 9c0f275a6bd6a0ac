//! 일일 로그인 기록 (`login_history` 테이블, `user_id, login_date` 유니크)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRecord {
    pub user_id: String,
    pub login_date: NaiveDate,
}
