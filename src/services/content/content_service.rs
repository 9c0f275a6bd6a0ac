//! 콘텐츠 서비스
//!
//! 팁 검색은 질의와 각 팁을 Gemini로 임베딩한 뒤 코사인 유사도로 정렬합니다.
//! 팁 임베딩은 `(모델, 팁 ID)` 키로 Redis에 캐시됩니다.

use std::sync::Arc;
use chrono::{Datelike, NaiveDate, Utc};
use futures_util::future::try_join_all;
use singleton_macro::service;
use uuid::Uuid;
use crate::caching::redis::{RedisClient, keys};
use crate::clients::GeminiClient;
use crate::clients::gemini::EmbeddingTask;
use crate::config::CacheConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::common::PageQuery;
use crate::domain::dto::content::{
    CreateEventRequest, CreateStoryRequest, CreateTipRequest, ScoredTip, TipSearchQuery,
};
use crate::domain::entities::{
    CommunityEvent, EcoTip, NewCommunityEvent, NewEcoTip, NewSuccessStory, SuccessStory,
};
use crate::repositories::content::{EventRepository, StoryRepository, TipRepository};
use crate::utils::string_utils::clean_optional_string;
use super::similarity;

pub const DEFAULT_SEARCH_RESULTS: usize = 5;
pub const MAX_SEARCH_RESULTS: usize = 20;
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

#[service(name = "content")]
pub struct ContentService {
    tip_repo: Arc<TipRepository>,
    story_repo: Arc<StoryRepository>,
    event_repo: Arc<EventRepository>,
    gemini: Arc<GeminiClient>,
    redis: Arc<RedisClient>,
}

impl ContentService {
    pub async fn tips(&self, category: Option<&str>) -> AppResult<Vec<EcoTip>> {
        match category {
            Some(category) => self.tip_repo.find_by_category(category).await,
            None => self.tip_repo.find_all().await,
        }
    }

    /// 오늘의 팁. 같은 날에는 모든 사용자가 같은 팁을 봅니다.
    pub async fn daily_tip(&self) -> AppResult<EcoTip> {
        let mut tips = self.tip_repo.find_all().await?;

        daily_index(Utc::now().date_naive(), tips.len())
            .map(|index| tips.swap_remove(index))
            .ok_or_else(|| AppError::NotFound("등록된 팁이 없습니다".to_string()))
    }

    /// 의미 기반 팁 검색
    pub async fn search_tips(&self, query: &TipSearchQuery) -> AppResult<Vec<ScoredTip>> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_SEARCH_RESULTS)
            .clamp(1, MAX_SEARCH_RESULTS);

        let tips = self.tip_repo.find_all().await?;
        if tips.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.gemini.embed(query.q.trim(), EmbeddingTask::Query).await?;
        let tip_embeddings = try_join_all(tips.iter().map(|tip| self.tip_embedding(tip))).await?;

        let candidates: Vec<(EcoTip, Vec<f32>)> = tips.into_iter().zip(tip_embeddings).collect();

        Ok(similarity::rank(&query_embedding, candidates, limit)
            .into_iter()
            .map(|(tip, score)| ScoredTip { tip, score })
            .collect())
    }

    async fn tip_embedding(&self, tip: &EcoTip) -> AppResult<Vec<f32>> {
        let cache_key = keys::tip_embedding(&tip.id.to_string(), self.gemini.embedding_model());

        if let Ok(Some(cached)) = self.redis.get::<Vec<f32>>(&cache_key).await {
            return Ok(cached);
        }

        let embedding = self.gemini.embed(&tip.embedding_text(), EmbeddingTask::Document).await?;

        if let Err(e) = self.redis
            .set_with_expiry(&cache_key, &embedding, CacheConfig::embedding_ttl_secs())
            .await
        {
            log::debug!("임베딩 캐시 저장 실패 ({}): {}", tip.id, e);
        }

        Ok(embedding)
    }

    pub async fn create_tip(&self, request: CreateTipRequest) -> AppResult<EcoTip> {
        let tip = self
            .tip_repo
            .insert(&NewEcoTip {
                title: request.title.trim().to_string(),
                content: request.content.trim().to_string(),
                category: clean_optional_string(request.category).map(|c| c.to_lowercase()),
            })
            .await?;

        log::info!("💡 팁 등록: {}", tip.title);
        Ok(tip)
    }

    /// 승인된 사례만 공개됩니다.
    pub async fn stories(&self, page: PageQuery) -> AppResult<Vec<SuccessStory>> {
        self.story_repo
            .list_approved(page.limit_or(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE), page.offset())
            .await
    }

    /// 사례 제출. 관리자 승인 전까지 목록에 나오지 않습니다.
    pub async fn submit_story(&self, user_id: &str, request: CreateStoryRequest) -> AppResult<SuccessStory> {
        let story = self
            .story_repo
            .insert(&NewSuccessStory {
                user_id: user_id.to_string(),
                title: request.title.trim().to_string(),
                content: request.content.trim().to_string(),
                co2_saved_kg: request.co2_saved_kg,
                is_approved: false,
            })
            .await?;

        log::info!("📖 사례 제출: user={} story={}", user_id, story.id);
        Ok(story)
    }

    pub async fn approve_story(&self, story_id: Uuid) -> AppResult<SuccessStory> {
        self.story_repo
            .approve(story_id)
            .await?
            .ok_or_else(|| AppError::NotFound("사례를 찾을 수 없습니다".to_string()))
    }

    pub async fn upcoming_events(&self, limit: usize) -> AppResult<Vec<CommunityEvent>> {
        self.event_repo.find_upcoming(Utc::now(), limit).await
    }

    pub async fn create_event(&self, organizer_id: &str, request: CreateEventRequest) -> AppResult<CommunityEvent> {
        let event = self
            .event_repo
            .insert(&NewCommunityEvent {
                title: request.title.trim().to_string(),
                description: clean_optional_string(request.description),
                location: clean_optional_string(request.location),
                starts_at: request.starts_at,
                ends_at: request.ends_at,
                organizer_id: Some(organizer_id.to_string()),
            })
            .await?;

        log::info!("📅 행사 등록: {} ({})", event.title, event.starts_at);
        Ok(event)
    }
}

/// 날짜별로 고정되고 매일 바뀌는 인덱스
fn daily_index(date: NaiveDate, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let day = usize::try_from(date.num_days_from_ce()).unwrap_or_default();
    Some(day % len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_index_rotates_each_day() {
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let tuesday = monday.succ_opt().unwrap();

        let a = daily_index(monday, 7).unwrap();
        let b = daily_index(tuesday, 7).unwrap();

        assert!(a < 7);
        assert_eq!(b, (a + 1) % 7);
        assert_eq!(daily_index(monday, 7), daily_index(monday, 7));
    }

    #[test]
    fn test_daily_index_empty_catalogue() {
        assert_eq!(daily_index(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), 0), None);
        assert_eq!(daily_index(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), 1), Some(0));
    }
}
