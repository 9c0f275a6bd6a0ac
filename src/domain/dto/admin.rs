//! 관리자 요청 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

/// `POST /api/v1/admin/emails/broadcast`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BroadcastRequest {
    #[validate(length(min = 1, max = 200, message = "제목은 1-200자 사이여야 합니다"))]
    pub subject: String,

    /// 본문 (일반 텍스트, 빈 줄로 문단 구분)
    #[validate(length(min = 1, max = 20000, message = "본문은 1-20000자 사이여야 합니다"))]
    pub message: String,
}

/// 발송 결과. 실패한 수신자가 있어도 나머지 발송은 계속됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BroadcastResult {
    pub sent: usize,
    pub failed: usize,
    pub failures: Vec<String>,
}
