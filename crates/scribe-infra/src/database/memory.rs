//! In-memory repositories - used as fallback when no database is configured
//! and as the substrate for handler tests.
//!
//! Note: data is lost on process restart.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{Group, Post, PostEntry, User};
use scribe_core::error::RepoError;
use scribe_core::pagination::{self, PAGE_SIZE, Page};
use scribe_core::ports::{
    BaseRepository, GroupRepository, PostFilter, PostRepository, UserRepository,
};

/// Shared backing store for the in-memory repositories.
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<Vec<User>>,
    groups: RwLock<Vec<Group>>,
    posts: RwLock<Vec<Post>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Join a post with its author and optional group.
    async fn entry(&self, post: Post) -> Result<PostEntry, RepoError> {
        let author = self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.id == post.author_id)
            .cloned()
            .ok_or_else(|| {
                RepoError::Query(format!(
                    "author {} missing for post {}",
                    post.author_id, post.id
                ))
            })?;

        let group = match post.group_id {
            Some(gid) => self.groups.read().await.iter().find(|g| g.id == gid).cloned(),
            None => None,
        };

        Ok(PostEntry {
            post,
            author,
            group,
        })
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let users = self.store.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, entity: User) -> Result<User, RepoError> {
        let mut users = self.store.users.write().await;
        if users
            .iter()
            .any(|u| u.id == entity.id || u.username == entity.username)
        {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        users.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: User) -> Result<User, RepoError> {
        let mut users = self.store.users.write().await;
        let slot = users
            .iter_mut()
            .find(|u| u.id == entity.id)
            .ok_or(RepoError::NotFound)?;

        *slot = entity.clone();
        Ok(entity)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.store.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }
}

/// In-memory group repository.
pub struct InMemoryGroupRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryGroupRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Group, Uuid> for InMemoryGroupRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, RepoError> {
        let groups = self.store.groups.read().await;
        Ok(groups.iter().find(|g| g.id == id).cloned())
    }

    async fn insert(&self, entity: Group) -> Result<Group, RepoError> {
        let mut groups = self.store.groups.write().await;
        if groups
            .iter()
            .any(|g| g.id == entity.id || g.slug == entity.slug)
        {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        groups.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: Group) -> Result<Group, RepoError> {
        let mut groups = self.store.groups.write().await;
        let slot = groups
            .iter_mut()
            .find(|g| g.id == entity.id)
            .ok_or(RepoError::NotFound)?;

        *slot = entity.clone();
        Ok(entity)
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let groups = self.store.groups.read().await;
        Ok(groups.iter().find(|g| g.slug == slug).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Group>, RepoError> {
        let groups = self.store.groups.read().await;
        let mut all: Vec<Group> = groups.clone();
        all.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(all)
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPostRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.store.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
        let mut posts = self.store.posts.write().await;
        if posts.iter().any(|p| p.id == entity.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        posts.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        let mut posts = self.store.posts.write().await;
        let slot = posts
            .iter_mut()
            .find(|p| p.id == entity.id)
            .ok_or(RepoError::NotFound)?;

        *slot = entity.clone();
        Ok(entity)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_entry(&self, id: Uuid) -> Result<Option<PostEntry>, RepoError> {
        let post = {
            let posts = self.store.posts.read().await;
            posts.iter().find(|p| p.id == id).cloned()
        };

        match post {
            Some(post) => Ok(Some(self.store.entry(post).await?)),
            None => Ok(None),
        }
    }

    async fn page_recent(
        &self,
        filter: PostFilter,
        page: u64,
    ) -> Result<Page<PostEntry>, RepoError> {
        let mut matching: Vec<Post> = {
            let posts = self.store.posts.read().await;
            posts
                .iter()
                .filter(|p| match filter {
                    PostFilter::All => true,
                    PostFilter::ByGroup(id) => p.group_id == Some(id),
                    PostFilter::ByAuthor(id) => p.author_id == id,
                })
                .cloned()
                .collect()
        };
        matching.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));

        let total_items = matching.len() as u64;
        let total_pages = pagination::total_pages(total_items, PAGE_SIZE);
        let number = pagination::clamp_page(page, total_pages);
        let start = ((number - 1) * PAGE_SIZE) as usize;

        let mut items = Vec::new();
        for post in matching.into_iter().skip(start).take(PAGE_SIZE as usize) {
            items.push(self.store.entry(post).await?);
        }

        Ok(Page {
            items,
            number,
            total_pages,
            total_items,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    async fn seed_user(store: &Arc<InMemoryStore>, username: &str) -> User {
        let repo = InMemoryUserRepository::new(store.clone());
        repo.insert(User::new(username.to_string(), "hash".to_string()))
            .await
            .unwrap()
    }

    async fn seed_group(store: &Arc<InMemoryStore>, slug: &str) -> Group {
        let repo = InMemoryGroupRepository::new(store.clone());
        repo.insert(Group::new(
            format!("Group {slug}"),
            slug.to_string(),
            "description".to_string(),
        ))
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn find_user_by_username() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "leo").await;

        let repo = InMemoryUserRepository::new(store);
        let found = repo.find_by_username("leo").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_constraint_violation() {
        let store = InMemoryStore::new();
        seed_user(&store, "leo").await;

        let repo = InMemoryUserRepository::new(store);
        let result = repo
            .insert(User::new("leo".to_string(), "hash2".to_string()))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_constraint_violation() {
        let store = InMemoryStore::new();
        seed_group(&store, "rustaceans").await;

        let repo = InMemoryGroupRepository::new(store);
        let result = repo
            .insert(Group::new(
                "Other title".to_string(),
                "rustaceans".to_string(),
                "dup slug".to_string(),
            ))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn updating_a_missing_post_is_not_found() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "leo").await;

        let repo = InMemoryPostRepository::new(store);
        let result = repo
            .update(Post::new(user.id, "never inserted".to_string(), None))
            .await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn thirteen_posts_paginate_ten_then_three() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "leo").await;
        let group = seed_group(&store, "rustaceans").await;

        let repo = InMemoryPostRepository::new(store.clone());
        let base = chrono::Utc::now();
        for i in 0..13 {
            let mut post = Post::new(user.id, format!("post {i}"), Some(group.id));
            post.pub_date = base + TimeDelta::seconds(i);
            repo.insert(post).await.unwrap();
        }

        for filter in [
            PostFilter::All,
            PostFilter::ByGroup(group.id),
            PostFilter::ByAuthor(user.id),
        ] {
            let first = repo.page_recent(filter, 1).await.unwrap();
            assert_eq!(first.len(), 10);
            assert_eq!(first.total_pages, 2);
            assert_eq!(first.total_items, 13);
            // newest first
            assert_eq!(first.items[0].post.text, "post 12");

            let second = repo.page_recent(filter, 2).await.unwrap();
            assert_eq!(second.len(), 3);
            assert_eq!(second.items[2].post.text, "post 0");
        }
    }

    #[tokio::test]
    async fn out_of_range_page_clamps_to_last() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "leo").await;

        let repo = InMemoryPostRepository::new(store);
        let base = chrono::Utc::now();
        for i in 0..13 {
            let mut post = Post::new(user.id, format!("post {i}"), None);
            post.pub_date = base + TimeDelta::seconds(i);
            repo.insert(post).await.unwrap();
        }

        let page = repo.page_recent(PostFilter::All, 99).await.unwrap();
        assert_eq!(page.number, 2);
        assert_eq!(page.len(), 3);

        let page = repo.page_recent(PostFilter::All, 0).await.unwrap();
        assert_eq!(page.number, 1);
        assert_eq!(page.len(), 10);
    }

    #[tokio::test]
    async fn group_filter_excludes_other_groups() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "leo").await;
        let cooks = seed_group(&store, "cooks").await;
        let hikers = seed_group(&store, "hikers").await;

        let repo = InMemoryPostRepository::new(store);
        repo.insert(Post::new(user.id, "stew recipe".to_string(), Some(cooks.id)))
            .await
            .unwrap();

        let cook_page = repo
            .page_recent(PostFilter::ByGroup(cooks.id), 1)
            .await
            .unwrap();
        assert_eq!(cook_page.len(), 1);
        assert_eq!(cook_page.items[0].group.as_ref().unwrap().slug, "cooks");

        let hiker_page = repo
            .page_recent(PostFilter::ByGroup(hikers.id), 1)
            .await
            .unwrap();
        assert!(hiker_page.is_empty());
    }

    #[tokio::test]
    async fn entry_joins_author_and_group() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "leo").await;
        let group = seed_group(&store, "rustaceans").await;

        let repo = InMemoryPostRepository::new(store);
        let post = repo
            .insert(Post::new(user.id, "hello".to_string(), Some(group.id)))
            .await
            .unwrap();

        let entry = repo.find_entry(post.id).await.unwrap().unwrap();
        assert_eq!(entry.author.username, "leo");
        assert_eq!(entry.group.unwrap().slug, "rustaceans");

        assert!(repo.find_entry(Uuid::new_v4()).await.unwrap().is_none());
    }
}
