//! # Repository Layer
//!
//! Supabase 테이블별 데이터 액세스를 담당합니다. 각 리포지토리는
//! [`register_repository!`](crate::register_repository)로 선언되어 싱글톤으로 관리되고,
//! `ServiceLocator`를 통해 `SupabaseClient`(필요 시 `RedisClient`)를 주입받습니다.
//!
//! 서비스 롤 키로 접근하므로 사용자 데이터를 다루는 메서드는 모두 `user_id`를 인자로 받아
//! 필터에 포함합니다.
//!
//! | 리포지토리 | 테이블 |
//! |-----------|--------|
//! | `ProfileRepository` | `profiles` |
//! | `ActivityRepository` | `activities` |
//! | `BillRepository` | `bills` |
//! | `BadgeRepository` / `UserBadgeRepository` | `badges` / `user_badges` |
//! | `PostRepository` | `posts` |
//! | `GroupRepository` / `GroupMemberRepository` | `groups` / `group_members` |
//! | `LoginHistoryRepository` | `login_history` |
//! | `StoryRepository` / `TipRepository` / `EventRepository` | `success_stories` / `eco_tips` / `community_events` |

pub mod profiles;
pub mod activities;
pub mod bills;
pub mod badges;
pub mod community;
pub mod streaks;
pub mod content;
