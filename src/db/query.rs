//! PostgREST 쿼리 문자열 빌더
//!
//! Supabase 테이블 조회/수정/삭제 요청에 붙는 필터, 정렬, 페이지네이션을 조립합니다.
//!
//! ```rust,ignore
//! let query = PostgrestQuery::new()
//!     .select("id,activity_date,total_kg")
//!     .eq("user_id", &user_id)
//!     .gte("activity_date", from)
//!     .order("activity_date", false)
//!     .limit(30);
//!
//! // select=id,activity_date,total_kg&user_id=eq.user_2x&activity_date=gte.2024-03-01&order=activity_date.desc&limit=30
//! let rows: Vec<Activity> = client.select("activities", &query).await?;
//! ```
//!
//! 컬럼 이름은 코드 상수만 사용하므로 인코딩하지 않고, 값은 항상 퍼센트 인코딩합니다.

use std::fmt::Display;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostgrestQuery {
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Vec<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl PostgrestQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.replace(' ', ""));
        self
    }

    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "eq", value.to_string())
    }

    pub fn neq(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "neq", value.to_string())
    }

    pub fn gt(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "gt", value.to_string())
    }

    pub fn gte(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "gte", value.to_string())
    }

    pub fn lt(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "lt", value.to_string())
    }

    pub fn lte(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "lte", value.to_string())
    }

    /// 대소문자 무시 패턴 매칭 (`*`가 와일드카드)
    pub fn ilike(self, column: &str, pattern: impl Display) -> Self {
        self.filter(column, "ilike", pattern.to_string())
    }

    pub fn is_null(self, column: &str) -> Self {
        self.filter(column, "is", "null".to_string())
    }

    /// `column=in.("a","b")`. 값은 큰따옴표로 감싸 쉼표/괄호가 포함돼도 안전합니다.
    pub fn in_list<I, V>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        let quoted: Vec<String> = values
            .into_iter()
            .map(|value| {
                let escaped = value.to_string().replace('\\', "\\\\").replace('"', "\\\"");
                format!("\"{}\"", escaped)
            })
            .collect();

        self.filter(column, "in", format!("({})", quoted.join(",")))
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.order.push(format!("{}.{}", column, direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// 필터가 하나도 없는지 여부 (전체 테이블 수정/삭제 방지용)
    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    fn filter(mut self, column: &str, operator: &str, value: String) -> Self {
        self.filters.push((
            column.to_string(),
            format!("{}.{}", operator, urlencoding::encode(&value)),
        ));
        self
    }

    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::with_capacity(self.filters.len() + 4);

        if let Some(select) = &self.select {
            parts.push(format!("select={}", select));
        }

        for (column, condition) in &self.filters {
            parts.push(format!("{}={}", column, condition));
        }

        if !self.order.is_empty() {
            parts.push(format!("order={}", self.order.join(",")));
        }

        if let Some(limit) = self.limit {
            parts.push(format!("limit={}", limit));
        }

        if let Some(offset) = self.offset {
            parts.push(format!("offset={}", offset));
        }

        parts.join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn test_full_query_string() {
        let from = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let query = PostgrestQuery::new()
            .select("id, activity_date, total_kg")
            .eq("user_id", "user_2abc")
            .gte("activity_date", from)
            .order("activity_date", false)
            .order("created_at", true)
            .limit(30)
            .offset(60);

        assert_eq!(
            query.to_query_string(),
            "select=id,activity_date,total_kg&user_id=eq.user_2abc&activity_date=gte.2024-03-01\
             &order=activity_date.desc,created_at.asc&limit=30&offset=60"
        );
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let starts = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let query = PostgrestQuery::new().gte("starts_at", starts.to_rfc3339());

        // '+'가 그대로 가면 공백으로 해석되므로 반드시 인코딩
        assert_eq!(
            query.to_query_string(),
            "starts_at=gte.2024-05-01T09%3A30%3A00%2B00%3A00"
        );
    }

    #[test]
    fn test_in_list_quotes_values() {
        let query = PostgrestQuery::new().in_list("badge_id", ["a,b", "c"]);
        assert_eq!(
            query.to_query_string(),
            "badge_id=in.%28%22a%2Cb%22%2C%22c%22%29"
        );
    }

    #[test]
    fn test_is_null_and_has_filters() {
        let empty = PostgrestQuery::new().limit(1);
        assert!(!empty.has_filters());

        let query = PostgrestQuery::new().is_null("group_id");
        assert!(query.has_filters());
        assert_eq!(query.to_query_string(), "group_id=is.null");
    }
}
