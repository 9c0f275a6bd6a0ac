//! 미들웨어 인증 정책

/// 인증 모드
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// 유효한 세션 토큰이 없으면 401
    Required,
    /// 토큰이 유효하면 사용자 정보를 넣고, 아니면 그대로 진행
    Optional,
}

/// 요구 역할
#[derive(Debug, Clone)]
pub enum RequiredRole {
    Single(String),
    Any(Vec<String>),
}

impl RequiredRole {
    pub fn is_satisfied(&self, user_roles: &[String]) -> bool {
        match self {
            RequiredRole::Single(required_role) => user_roles.contains(required_role),
            RequiredRole::Any(required_roles) => {
                required_roles.iter().any(|role| user_roles.contains(role))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_role_single() {
        let required = RequiredRole::Single("admin".to_string());

        assert!(required.is_satisfied(&["user".to_string(), "admin".to_string()]));
        assert!(!required.is_satisfied(&["user".to_string()]));
    }

    #[test]
    fn test_required_role_any() {
        let required = RequiredRole::Any(vec!["admin".to_string(), "moderator".to_string()]);

        assert!(required.is_satisfied(&["moderator".to_string()]));
        assert!(!required.is_satisfied(&["user".to_string()]));
        assert!(!required.is_satisfied(&[]));
    }
}
