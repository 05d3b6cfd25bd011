//! Post listing, detail, create and edit handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use scribe_core::domain::Post;
use scribe_core::ports::{
    BaseRepository, GroupRepository, PostFilter, PostRepository, UserRepository,
};
use scribe_shared::forms::{PostForm, PostFormErrors, PostInput};

use crate::middleware::auth::{CurrentUser, MaybeUser};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::templates::{
    self, GroupChoice, GroupListTemplate, IndexTemplate, PostDetailTemplate, PostFormContext,
    PostFormTemplate, ProfileTemplate,
};

use super::redirect;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    /// Lenient page parsing: an absent or non-numeric value means page 1.
    fn number(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or(1)
    }
}

/// GET /
pub async fn index(
    state: web::Data<AppState>,
    user: MaybeUser,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state
        .posts
        .page_recent(PostFilter::All, query.number())
        .await?;

    templates::render(&IndexTemplate { user: user.0, page })
}

/// GET /group/{slug}/
pub async fn group_list(
    state: web::Data<AppState>,
    user: MaybeUser,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let group = state
        .groups
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No group with slug {slug}")))?;

    let page = state
        .posts
        .page_recent(PostFilter::ByGroup(group.id), query.number())
        .await?;

    templates::render(&GroupListTemplate {
        user: user.0,
        group,
        page,
    })
}

/// GET /profile/{username}/
pub async fn profile(
    state: web::Data<AppState>,
    user: MaybeUser,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let author = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user named {username}")))?;

    let page = state
        .posts
        .page_recent(PostFilter::ByAuthor(author.id), query.number())
        .await?;

    templates::render(&ProfileTemplate {
        user: user.0,
        author,
        page,
    })
}

/// GET /posts/{id}/
pub async fn detail(
    state: web::Data<AppState>,
    user: MaybeUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let entry = state
        .posts
        .find_entry(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No post with id {id}")))?;

    let can_edit = user
        .0
        .as_ref()
        .is_some_and(|u| u.id == entry.post.author_id);

    templates::render(&PostDetailTemplate {
        user: user.0,
        entry,
        can_edit,
    })
}

/// GET /create/
pub async fn create_form(state: web::Data<AppState>, user: CurrentUser) -> AppResult<HttpResponse> {
    let groups = state.groups.list_all().await?;

    templates::render(&PostFormTemplate {
        form: PostFormContext::empty(),
        choices: GroupChoice::build(&groups, ""),
        editing: false,
        action: "/create/".to_string(),
        user: Some(user),
    })
}

/// POST /create/
pub async fn create(
    state: web::Data<AppState>,
    user: CurrentUser,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    match validate(&state, &form).await? {
        Ok(input) => {
            let post = Post::new(user.id, input.text, input.group_id);
            state.posts.insert(post).await?;
            tracing::info!(author = %user.username, "Post created");

            Ok(redirect(&format!("/profile/{}/", user.username)))
        }
        Err(errors) => {
            let groups = state.groups.list_all().await?;

            templates::render(&PostFormTemplate {
                choices: GroupChoice::build(&groups, form.group.trim()),
                form: PostFormContext::from_form(&form, errors),
                editing: false,
                action: "/create/".to_string(),
                user: Some(user),
            })
        }
    }
}

/// GET /posts/{id}/edit/
pub async fn edit_form(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No post with id {id}")))?;

    // Only the author may edit; everyone else goes back to the post.
    if post.author_id != user.id {
        return Ok(redirect(&format!("/posts/{id}/")));
    }

    let groups = state.groups.list_all().await?;
    let selected = post.group_id.map(|g| g.to_string()).unwrap_or_default();

    templates::render(&PostFormTemplate {
        form: PostFormContext::from_post(&post),
        choices: GroupChoice::build(&groups, &selected),
        editing: true,
        action: format!("/posts/{id}/edit/"),
        user: Some(user),
    })
}

/// POST /posts/{id}/edit/
pub async fn edit(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No post with id {id}")))?;

    if post.author_id != user.id {
        return Ok(redirect(&format!("/posts/{id}/")));
    }

    let form = form.into_inner();
    match validate(&state, &form).await? {
        Ok(input) => {
            post.edit(input.text, input.group_id);
            state.posts.update(post).await?;
            tracing::info!(author = %user.username, post_id = %id, "Post edited");

            Ok(redirect(&format!("/posts/{id}/")))
        }
        Err(errors) => {
            let groups = state.groups.list_all().await?;

            templates::render(&PostFormTemplate {
                choices: GroupChoice::build(&groups, form.group.trim()),
                form: PostFormContext::from_form(&form, errors),
                editing: true,
                action: format!("/posts/{id}/edit/"),
                user: Some(user),
            })
        }
    }
}

/// Field validation plus a store lookup to reject group ids that do not
/// name an existing group.
async fn validate(
    state: &AppState,
    form: &PostForm,
) -> AppResult<Result<PostInput, PostFormErrors>> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => return Ok(Err(errors)),
    };

    if let Some(group_id) = input.group_id
        && state.groups.find_by_id(group_id).await?.is_none()
    {
        return Ok(Err(PostFormErrors {
            group: Some("Select a valid choice.".to_string()),
            ..Default::default()
        }));
    }

    Ok(Ok(input))
}
