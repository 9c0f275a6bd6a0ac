//! Clerk 세션 토큰 클레임
//!
//! Clerk 세션 JWT(RS256)의 페이로드입니다. 역할은 Clerk 대시보드의
//! "Customize session token"에서 `{"metadata": "{{user.public_metadata}}"}`로
//! 노출한 `metadata.role` 값을 사용합니다.

use serde::{Deserialize, Serialize};
use super::authenticated_user::{AuthenticatedUser, ROLE_ADMIN, ROLE_USER};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClerkSessionClaims {
    /// Clerk 사용자 ID
    pub sub: String,

    /// 세션 ID
    #[serde(default)]
    pub sid: Option<String>,

    /// 토큰을 발급받은 프론트엔드 오리진
    #[serde(default)]
    pub azp: Option<String>,

    pub exp: i64,

    #[serde(default)]
    pub nbf: Option<i64>,

    #[serde(default)]
    pub iat: Option<i64>,

    #[serde(default)]
    pub metadata: Option<SessionMetadata>,
}

impl ClerkSessionClaims {
    /// 기본 `user` 역할에 메타데이터 역할을 더한 목록
    pub fn roles(&self) -> Vec<String> {
        let mut roles = vec![ROLE_USER.to_string()];

        let extra = self
            .metadata
            .as_ref()
            .and_then(|metadata| metadata.role.as_deref())
            .map(str::trim)
            .filter(|role| !role.is_empty() && *role != ROLE_USER);

        if let Some(role) = extra {
            roles.push(role.to_lowercase());
        }

        roles
    }

    /// `azp`가 허용 목록에 있는지 확인합니다. 목록이 비어 있으면 검사하지 않습니다.
    pub fn is_authorized_party(&self, authorized_parties: &[String]) -> bool {
        if authorized_parties.is_empty() {
            return true;
        }

        match &self.azp {
            Some(azp) => authorized_parties.iter().any(|party| party == azp.trim_end_matches('/')),
            // 백엔드 간 호출 토큰에는 azp가 없음
            None => true,
        }
    }

    pub fn into_user(self) -> AuthenticatedUser {
        let roles = self.roles();
        AuthenticatedUser {
            user_id: self.sub,
            session_id: self.sid,
            roles,
        }
    }
}
