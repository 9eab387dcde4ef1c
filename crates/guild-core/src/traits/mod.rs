//! Domain ports: repository traits and deletion capabilities

mod deletion;
mod repositories;

pub use deletion::{
    CacheEvictor, DeletionTarget, MemberEnumerator, RelationEnumerator, StandardDelete,
};
pub use repositories::{
    ApplicationRepository, EconomyRepository, GuildRepository, InviteRepository, LogRepository,
    MemberRepository, RelationRepository, RepoResult,
};
