use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Group, Post, PostEntry, User};
use crate::error::RepoError;
use crate::pagination::Page;

/// Generic repository trait defining the standard persistence operations.
///
/// Every write is a single atomic statement; consistency (unique slugs and
/// usernames) is delegated to the store's constraints.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Update an existing entity in place.
    async fn update(&self, entity: T) -> Result<T, RepoError>;
}

/// User repository with domain-specific lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their unique username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Group repository.
#[async_trait]
pub trait GroupRepository: BaseRepository<Group, Uuid> {
    /// Find a group by its unique slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;

    /// All groups, for the group choice on the post form.
    async fn list_all(&self) -> Result<Vec<Group>, RepoError>;
}

/// Which posts a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    All,
    ByGroup(Uuid),
    ByAuthor(Uuid),
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// A post joined with its author and group, for the detail page.
    async fn find_entry(&self, id: Uuid) -> Result<Option<PostEntry>, RepoError>;

    /// One page of posts matching `filter`, ordered newest-first. The page
    /// number is 1-indexed and clamped into the valid range.
    async fn page_recent(&self, filter: PostFilter, page: u64)
    -> Result<Page<PostEntry>, RepoError>;
}
