//! Supabase Database Access Module
//!
//! Supabase가 Postgres 위에 노출하는 PostgREST HTTP API(`/rest/v1`) 클라이언트입니다.
//! 영속성, 유니크 제약, 참조 무결성은 모두 외부 데이터베이스가 보장하며,
//! 이 모듈은 요청 조립과 응답/에러 디코딩만 담당합니다.
//!
//! # 환경 변수 설정
//!
//! ```bash
//! export SUPABASE_URL="https://xyzcompany.supabase.co"
//! export SUPABASE_SERVICE_ROLE_KEY="eyJhbGciOi..."
//! ```
//!
//! # 보안 주의
//!
//! 서비스 롤 키는 RLS를 우회합니다. 사용자 데이터를 다루는 리포지토리는
//! 항상 인증된 사용자 ID로 필터링해야 합니다.
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use crate::db::{SupabaseClient, PostgrestQuery};
//! use crate::core::registry::ServiceLocator;
//!
//! let client = Arc::new(SupabaseClient::new()?);
//! client.ping().await?;
//! ServiceLocator::set(client);
//! ```

pub mod query;

pub use query::PostgrestQuery;

use std::time::Duration;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_RANGE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use crate::config::SupabaseConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};

/// 업서트 충돌 처리 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// 충돌 행은 무시 (응답에는 새로 삽입된 행만 포함)
    IgnoreDuplicates,
    /// 충돌 행을 새 값으로 병합
    MergeDuplicates,
}

impl Resolution {
    fn prefer_value(&self) -> &'static str {
        match self {
            Resolution::IgnoreDuplicates => "resolution=ignore-duplicates",
            Resolution::MergeDuplicates => "resolution=merge-duplicates",
        }
    }
}

/// PostgREST 에러 응답 본문
#[derive(Debug, Default, Deserialize)]
struct PostgrestErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
}

/// PostgREST 에러 응답을 [`AppError`]로 변환합니다.
///
/// | 코드 | 의미 | 변환 |
/// |------|------|------|
/// | `23505` | unique_violation | `ConflictError` |
/// | `23503` | foreign_key_violation | `ValidationError` |
/// | `22P02` | invalid_text_representation (잘못된 UUID 등) | `ValidationError` |
/// | `PGRST116` | 단일 행 요청에 0건 | `NotFound` |
/// | HTTP 404 | 테이블/행 없음 | `NotFound` |
pub fn map_postgrest_error(status: u16, body: &str) -> AppError {
    let parsed: PostgrestErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .clone()
        .unwrap_or_else(|| body.trim().to_string());
    let detail = match parsed.details.as_deref() {
        Some(details) if !details.is_empty() => format!("{} ({})", message, details),
        _ => message.clone(),
    };

    match parsed.code.as_deref() {
        Some("23505") => AppError::ConflictError(message),
        Some("23503") => AppError::ValidationError(format!("참조 대상이 존재하지 않습니다: {}", detail)),
        Some("22P02") => AppError::ValidationError(detail),
        Some("PGRST116") => AppError::NotFound(message),
        _ if status == 404 => AppError::NotFound(message),
        _ => AppError::DatabaseError(format!("PostgREST {}: {}", status, detail)),
    }
}

/// `Content-Range: 0-24/3573` 또는 `*/0`에서 전체 건수를 추출합니다.
pub fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/')
        .and_then(|(_, total)| total.trim().parse::<u64>().ok())
}

/// Supabase PostgREST 클라이언트
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    rest_url: String,
}

impl SupabaseClient {
    /// 환경 변수에서 설정을 읽어 클라이언트를 생성합니다.
    ///
    /// 인증 헤더(`apikey`, `Authorization`)와 스키마 헤더는 기본 헤더로 고정됩니다.
    pub fn new() -> AppResult<Self> {
        let rest_url = SupabaseConfig::rest_url()?;
        let service_key = SupabaseConfig::service_role_key()?;
        let schema = SupabaseConfig::schema();

        let mut headers = HeaderMap::new();
        headers.insert("apikey", Self::header_value(&service_key)?);
        headers.insert(
            reqwest::header::AUTHORIZATION,
            Self::header_value(&format!("Bearer {}", service_key))?,
        );
        headers.insert("Accept-Profile", Self::header_value(&schema)?);
        headers.insert("Content-Profile", Self::header_value(&schema)?);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(SupabaseConfig::timeout_secs()))
            .build()
            .context("Supabase HTTP 클라이언트 생성 실패")?;

        Ok(Self { http, rest_url })
    }

    fn header_value(value: &str) -> AppResult<HeaderValue> {
        HeaderValue::from_str(value)
            .context("잘못된 헤더 값")
    }

    /// PostgREST 루트 엔드포인트로 연결과 키를 확인합니다.
    pub async fn ping(&self) -> AppResult<()> {
        let response = self.http
            .get(format!("{}/", self.rest_url))
            .send()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Supabase 연결 실패: {}", e)))?;

        Self::ensure_success(response).await?;
        info!("✅ Supabase 연결 성공: {}", self.rest_url);
        Ok(())
    }

    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    fn table_url(&self, table: &str, query: Option<&PostgrestQuery>) -> String {
        match query.map(PostgrestQuery::to_query_string) {
            Some(qs) if !qs.is_empty() => format!("{}/{}?{}", self.rest_url, table, qs),
            _ => format!("{}/{}", self.rest_url, table),
        }
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        debug!("PostgREST {} {}", method, url);
        self.http.request(method, url)
    }

    async fn send(builder: RequestBuilder) -> AppResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Supabase 요청 실패: {}", e)))?;

        Self::ensure_success(response).await
    }

    async fn ensure_success(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_postgrest_error(status.as_u16(), &body))
    }

    async fn decode<R: DeserializeOwned>(response: Response) -> AppResult<R> {
        response
            .json::<R>()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Supabase 응답 파싱 실패: {}", e)))
    }

    /// 조건에 맞는 행 목록을 조회합니다.
    pub async fn select<T: DeserializeOwned>(&self, table: &str, query: &PostgrestQuery) -> AppResult<Vec<T>> {
        let response = Self::send(self.request(Method::GET, self.table_url(table, Some(query)))).await?;
        Self::decode(response).await
    }

    /// 첫 번째 행만 조회합니다.
    pub async fn select_one<T: DeserializeOwned>(&self, table: &str, query: &PostgrestQuery) -> AppResult<Option<T>> {
        let rows: Vec<T> = self.select(table, &query.clone().limit(1)).await?;
        Ok(rows.into_iter().next())
    }

    /// 조건에 맞는 행 수를 셉니다 (`Prefer: count=exact`, 본문 없음).
    pub async fn count(&self, table: &str, query: &PostgrestQuery) -> AppResult<u64> {
        let builder = self
            .request(Method::HEAD, self.table_url(table, Some(query)))
            .header("Prefer", "count=exact");
        let response = Self::send(builder).await?;

        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| AppError::DatabaseError(format!("{} 건수 응답에 Content-Range가 없습니다", table)))
    }

    /// 행(단일 객체 또는 배열)을 삽입하고 삽입된 행을 반환합니다.
    pub async fn insert<T, R>(&self, table: &str, rows: &T) -> AppResult<Vec<R>>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let builder = self
            .request(Method::POST, self.table_url(table, None))
            .header("Prefer", "return=representation")
            .json(rows);

        Self::decode(Self::send(builder).await?).await
    }

    /// `on_conflict` 컬럼 기준으로 업서트합니다.
    ///
    /// [`Resolution::IgnoreDuplicates`]일 때 응답에는 실제로 새로 삽입된 행만 포함됩니다.
    pub async fn upsert<T, R>(
        &self,
        table: &str,
        rows: &T,
        on_conflict: &str,
        resolution: Resolution,
    ) -> AppResult<Vec<R>>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}?on_conflict={}", self.table_url(table, None), on_conflict);
        let builder = self
            .request(Method::POST, url)
            .header("Prefer", format!("return=representation,{}", resolution.prefer_value()))
            .json(rows);

        Self::decode(Self::send(builder).await?).await
    }

    /// 조건에 맞는 행을 부분 수정하고 수정된 행을 반환합니다.
    pub async fn update<T, R>(&self, table: &str, query: &PostgrestQuery, patch: &T) -> AppResult<Vec<R>>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        Self::guard_filtered(table, query)?;

        let builder = self
            .request(Method::PATCH, self.table_url(table, Some(query)))
            .header("Prefer", "return=representation")
            .json(patch);

        Self::decode(Self::send(builder).await?).await
    }

    /// 조건에 맞는 행을 삭제하고 삭제된 행 수를 반환합니다.
    pub async fn delete(&self, table: &str, query: &PostgrestQuery) -> AppResult<usize> {
        Self::guard_filtered(table, query)?;

        let builder = self
            .request(Method::DELETE, self.table_url(table, Some(query)))
            .header("Prefer", "return=representation");
        let deleted: Vec<serde_json::Value> = Self::decode(Self::send(builder).await?).await?;

        Ok(deleted.len())
    }

    /// 필터 없는 PATCH/DELETE는 테이블 전체에 적용되므로 거부합니다.
    fn guard_filtered(table: &str, query: &PostgrestQuery) -> AppResult<()> {
        if query.has_filters() {
            Ok(())
        } else {
            Err(AppError::InternalError(format!("{} 테이블 전체 수정/삭제는 허용되지 않습니다", table)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_maps_to_conflict() {
        let body = r#"{"code":"23505","message":"duplicate key value violates unique constraint \"user_badges_pkey\"","details":null,"hint":null}"#;
        match map_postgrest_error(409, body) {
            AppError::ConflictError(msg) => assert!(msg.contains("duplicate key")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_foreign_key_and_bad_uuid_map_to_validation() {
        let fk = r#"{"code":"23503","message":"insert violates foreign key","details":"Key (group_id) is not present"}"#;
        assert!(matches!(map_postgrest_error(409, fk), AppError::ValidationError(_)));

        let uuid = r#"{"code":"22P02","message":"invalid input syntax for type uuid: \"abc\""}"#;
        assert!(matches!(map_postgrest_error(400, uuid), AppError::ValidationError(_)));
    }

    #[test]
    fn test_not_found_cases() {
        let single = r#"{"code":"PGRST116","message":"JSON object requested, multiple (or no) rows returned"}"#;
        assert!(matches!(map_postgrest_error(406, single), AppError::NotFound(_)));
        assert!(matches!(map_postgrest_error(404, ""), AppError::NotFound(_)));
    }

    #[test]
    fn test_unknown_error_keeps_status_and_raw_body() {
        match map_postgrest_error(500, "upstream exploded") {
            AppError::DatabaseError(msg) => {
                assert!(msg.contains("500"));
                assert!(msg.contains("upstream exploded"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("0-24/3573"), Some(3573));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-9/*"), None);
        assert_eq!(parse_content_range_total("garbage"), None);
    }

    #[test]
    fn test_guard_filtered_rejects_unfiltered_queries() {
        assert!(SupabaseClient::guard_filtered("activities", &PostgrestQuery::new()).is_err());
        assert!(SupabaseClient::guard_filtered("activities", &PostgrestQuery::new().eq("id", 1)).is_ok());
    }
}
