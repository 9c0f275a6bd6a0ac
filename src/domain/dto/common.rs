//! 공통 쿼리 파라미터

use serde::Deserialize;

/// `?limit=&offset=` 페이지네이션
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl PageQuery {
    /// `limit`을 `1..=max`로 제한합니다. 없으면 `default`.
    pub fn limit_or(&self, default: usize, max: usize) -> usize {
        self.limit.unwrap_or(default).clamp(1, max.max(1))
    }

    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(PageQuery::default().limit_or(20, 100), 20);
        assert_eq!(PageQuery { limit: Some(0), offset: None }.limit_or(20, 100), 1);
        assert_eq!(PageQuery { limit: Some(5000), offset: None }.limit_or(20, 100), 100);
        assert_eq!(PageQuery { limit: None, offset: Some(40) }.offset(), 40);
    }
}
