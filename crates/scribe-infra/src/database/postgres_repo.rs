//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use scribe_core::domain::{Group, PostEntry, User};
use scribe_core::error::RepoError;
use scribe_core::pagination::{self, PAGE_SIZE, Page};
use scribe_core::ports::{GroupRepository, PostFilter, PostRepository, UserRepository};

use super::entity::group::{self, Entity as GroupEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL group repository.
pub type PostgresGroupRepository = PostgresBaseRepository<GroupEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

fn query_err(e: sea_orm::DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        tracing::debug!(%slug, "Finding group by slug");

        let result = GroupEntity::find()
            .filter(group::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Group>, RepoError> {
        let result = GroupEntity::find()
            .order_by_asc(group::Column::Title)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

impl PostgresPostRepository {
    /// Join a page of post rows with their authors and groups using two
    /// batched lookups instead of a query per row.
    async fn load_entries(&self, models: Vec<post::Model>) -> Result<Vec<PostEntry>, RepoError> {
        let author_ids: Vec<Uuid> = models.iter().map(|m| m.author_id).collect();
        let mut authors: HashMap<Uuid, User> = HashMap::new();
        if !author_ids.is_empty() {
            for model in UserEntity::find()
                .filter(user::Column::Id.is_in(author_ids))
                .all(&self.db)
                .await
                .map_err(query_err)?
            {
                authors.insert(model.id, model.into());
            }
        }

        let group_ids: Vec<Uuid> = models.iter().filter_map(|m| m.group_id).collect();
        let mut groups: HashMap<Uuid, Group> = HashMap::new();
        if !group_ids.is_empty() {
            for model in GroupEntity::find()
                .filter(group::Column::Id.is_in(group_ids))
                .all(&self.db)
                .await
                .map_err(query_err)?
            {
                groups.insert(model.id, model.into());
            }
        }

        models
            .into_iter()
            .map(|m| {
                let author = authors.get(&m.author_id).cloned().ok_or_else(|| {
                    RepoError::Query(format!("author {} missing for post {}", m.author_id, m.id))
                })?;
                let group = m.group_id.and_then(|gid| groups.get(&gid).cloned());

                Ok(PostEntry {
                    author,
                    group,
                    post: m.into(),
                })
            })
            .collect()
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_entry(&self, id: Uuid) -> Result<Option<PostEntry>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };

        let mut entries = self.load_entries(vec![model]).await?;
        Ok(entries.pop())
    }

    async fn page_recent(
        &self,
        filter: PostFilter,
        page: u64,
    ) -> Result<Page<PostEntry>, RepoError> {
        let mut query = PostEntity::find().order_by_desc(post::Column::PubDate);
        match filter {
            PostFilter::All => {}
            PostFilter::ByGroup(id) => query = query.filter(post::Column::GroupId.eq(id)),
            PostFilter::ByAuthor(id) => query = query.filter(post::Column::AuthorId.eq(id)),
        }

        let paginator = query.paginate(&self.db, PAGE_SIZE);
        let total_items = paginator.num_items().await.map_err(query_err)?;
        let total_pages = pagination::total_pages(total_items, PAGE_SIZE);
        let number = pagination::clamp_page(page, total_pages);

        // fetch_page is 0-indexed
        let models = paginator.fetch_page(number - 1).await.map_err(query_err)?;
        let items = self.load_entries(models).await?;

        Ok(Page {
            items,
            number,
            total_pages,
            total_items,
        })
    }
}
