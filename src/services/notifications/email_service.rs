//! 트랜잭션 메일과 전체 공지 발송

use std::sync::Arc;
use futures_util::future::join_all;
use singleton_macro::service;
use crate::clients::ResendClient;
use crate::config::ResendConfig;
use crate::core::errors::AppResult;
use crate::domain::dto::admin::{BroadcastRequest, BroadcastResult};
use crate::repositories::profiles::ProfileRepository;
use super::templates::{self, RenderedEmail};

#[service(name = "email")]
pub struct EmailService {
    resend: Arc<ResendClient>,
    profile_repo: Arc<ProfileRepository>,
}

impl EmailService {
    pub async fn send_welcome(&self, to: &str, name: &str) -> AppResult<String> {
        let email = templates::welcome(name, &ResendConfig::app_url());
        self.send_rendered(to, email).await
    }

    /// 이메일이 있는 모든 프로필에 공지를 보냅니다.
    ///
    /// `RESEND_BROADCAST_CONCURRENCY`개씩 묶어 동시에 보내며,
    /// 한 건이 실패해도 나머지는 계속 발송합니다.
    pub async fn broadcast(&self, request: &BroadcastRequest) -> AppResult<BroadcastResult> {
        let recipients: Vec<String> = self
            .profile_repo
            .find_all_with_email()
            .await?
            .into_iter()
            .filter_map(|profile| profile.email)
            .filter(|email| !email.trim().is_empty())
            .collect();

        let email = templates::announcement(&request.subject, &request.message);
        let mut result = BroadcastResult::default();

        for chunk in recipients.chunks(ResendConfig::broadcast_concurrency().max(1)) {
            let outcomes = join_all(
                chunk.iter().map(|to| self.send_rendered(to, email.clone())),
            )
            .await;

            for (to, outcome) in chunk.iter().zip(outcomes) {
                record_outcome(&mut result, to, outcome);
            }
        }

        log::info!(
            "📣 공지 발송 완료: 성공 {}건, 실패 {}건",
            result.sent,
            result.failed
        );

        Ok(result)
    }

    async fn send_rendered(&self, to: &str, email: RenderedEmail) -> AppResult<String> {
        let message = self.resend.message(to, &email.subject, email.html, Some(email.text));
        self.resend.send(&message).await
    }
}

fn record_outcome(result: &mut BroadcastResult, to: &str, outcome: AppResult<String>) {
    match outcome {
        Ok(_) => result.sent += 1,
        Err(e) => {
            log::warn!("⚠️ 공지 발송 실패: {} ({})", to, e);
            result.failed += 1;
            result.failures.push(to.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::AppError;

    #[test]
    fn test_record_outcome_counts_separately() {
        let mut result = BroadcastResult::default();

        record_outcome(&mut result, "a@relief.eco", Ok("msg_1".to_string()));
        record_outcome(&mut result, "b@relief.eco", Err(AppError::ExternalServiceError("429".to_string())));
        record_outcome(&mut result, "c@relief.eco", Ok("msg_2".to_string()));

        assert_eq!(result.sent, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.failures, vec!["b@relief.eco".to_string()]);
    }
}
