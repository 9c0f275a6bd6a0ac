pub mod post_repository;
pub mod group_repository;
pub mod group_member_repository;

pub use post_repository::PostRepository;
pub use group_repository::GroupRepository;
pub use group_member_repository::GroupMemberRepository;
