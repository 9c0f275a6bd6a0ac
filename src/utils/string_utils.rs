//! # 문자열 유틸리티
//!
//! 요청 DTO 정리, 이메일 템플릿, Gemini 응답 처리에서 공통으로 쓰는 문자열 함수들입니다.

use serde::Deserialize;
use crate::core::errors::AppError;

/// 앞뒤 공백을 제거하고 비어 있으면 검증 에러를 반환합니다.
///
/// ```rust,ignore
/// let title = validate_required_string(&payload.title, "title")?;
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 공백만 있는 선택 문자열을 `None`으로 정리합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// `#[serde(deserialize_with = "...")]`용 선택 문자열 정리 함수
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 문자 단위로 잘라내고, 잘린 경우 말줄임표를 붙입니다.
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }

    let mut truncated: String = value.chars().take(max_chars).collect();
    truncated.push('…');
    truncated
}

/// HTML 본문에 사용자 입력을 넣기 전에 특수 문자를 이스케이프합니다.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

/// LLM 응답을 감싼 마크다운 코드 펜스(```json ... ```)를 제거합니다.
pub fn strip_code_fences(value: &str) -> &str {
    let trimmed = value.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // 언어 태그(json 등)는 첫 줄 끝까지
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("  Plant a tree  ", "title").unwrap(), "Plant a tree");
        assert!(validate_required_string("", "title").is_err());
        assert!(validate_required_string("\t\n", "title").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  Pune  ".to_string())), Some("Pune".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct Patch {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            bio: Option<String>,
        }

        let patch: Patch = serde_json::from_str(r#"{"bio": "  cycling to work  "}"#).unwrap();
        assert_eq!(patch.bio, Some("cycling to work".to_string()));

        let patch: Patch = serde_json::from_str(r#"{"bio": "  "}"#).unwrap();
        assert_eq!(patch.bio, None);

        let patch: Patch = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(patch.bio, None);
    }

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("탄소발자국", 3), "탄소발…");
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n[1,2]\n```\n"), "[1,2]");
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }
}
