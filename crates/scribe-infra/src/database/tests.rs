use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

use scribe_core::domain::Post;
use scribe_core::ports::{BaseRepository, GroupRepository, PostRepository, UserRepository};

use crate::database::entity::{group, post, user};
use crate::database::postgres_repo::{
    PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository,
};

fn user_model(username: &str) -> user::Model {
    user::Model {
        id: Uuid::new_v4(),
        username: username.to_owned(),
        password_hash: "hash".to_owned(),
        created_at: chrono::Utc::now().into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: post_id,
            author_id,
            group_id: None,
            text: "Test post text".to_owned(),
            pub_date: now.into(),
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    assert!(result.is_some());
    let post = result.unwrap();
    assert_eq!(post.text, "Test post text");
    assert_eq!(post.id, post_id);
    assert_eq!(post.author_id, author_id);
}

#[tokio::test]
async fn test_find_user_by_username() {
    let model = user_model("leo");
    let user_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let user = repo.find_by_username("leo").await.unwrap().unwrap();
    assert_eq!(user.id, user_id);
    assert_eq!(user.username, "leo");
}

#[tokio::test]
async fn test_find_group_by_slug() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![group::Model {
            id: Uuid::new_v4(),
            title: "Rustaceans".to_owned(),
            slug: "rustaceans".to_owned(),
            description: "A group".to_owned(),
        }]])
        .into_connection();

    let repo = PostgresGroupRepository::new(db);

    let found = repo.find_by_slug("rustaceans").await.unwrap().unwrap();
    assert_eq!(found.title, "Rustaceans");
    assert_eq!(found.to_string(), "Rustaceans");
}

#[tokio::test]
async fn test_find_entry_joins_author() {
    let author = user_model("leo");
    let post_model = post::Model {
        id: Uuid::new_v4(),
        author_id: author.id,
        group_id: None,
        text: "joined".to_owned(),
        pub_date: chrono::Utc::now().into(),
    };
    let post_id = post_model.id;

    // One result set per query: the post lookup, then the batched author load.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model]])
        .append_query_results(vec![vec![author]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let entry = repo.find_entry(post_id).await.unwrap().unwrap();
    assert_eq!(entry.post.text, "joined");
    assert_eq!(entry.author.username, "leo");
    assert!(entry.group.is_none());
}
