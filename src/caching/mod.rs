//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 보조 캐시입니다. 리더보드, 공개 프로필, 팁 임베딩처럼
//! 원본에서 다시 만들 수 있는 값만 저장하며, Redis가 없으면 비활성 모드로 동작합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::{keys, RedisClient};
//!
//! let cache = RedisClient::connect_or_disabled().await;
//! cache.set_with_expiry(&keys::leaderboard(), &profiles, 60).await?;
//!
//! let cached: Option<Vec<Profile>> = cache.get(&keys::leaderboard()).await?;
//! cache.del_multiple(&[keys::leaderboard(), keys::public_profile(&user_id)]).await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
