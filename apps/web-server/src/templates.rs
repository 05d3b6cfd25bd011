//! Askama templates and their context types.
//!
//! Each page is a struct rendered against a file under `templates/`; the
//! fields are the rendering context the views expose (page, group, author,
//! post, form).

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;
use askama::Template;

use scribe_core::domain::{Group, Post, PostEntry, User};
use scribe_core::pagination::Page;
use scribe_shared::forms::{PostForm, PostFormErrors};

use crate::middleware::auth::CurrentUser;
use crate::middleware::error::AppResult;

/// Render a template into a `text/html` 200 response.
pub fn render<T: Template>(template: &T) -> AppResult<HttpResponse> {
    let body = template.render()?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}

#[derive(Template)]
#[template(path = "posts/index.html")]
pub struct IndexTemplate {
    pub user: Option<CurrentUser>,
    pub page: Page<PostEntry>,
}

#[derive(Template)]
#[template(path = "posts/group_list.html")]
pub struct GroupListTemplate {
    pub user: Option<CurrentUser>,
    pub group: Group,
    pub page: Page<PostEntry>,
}

#[derive(Template)]
#[template(path = "posts/profile.html")]
pub struct ProfileTemplate {
    pub user: Option<CurrentUser>,
    pub author: User,
    pub page: Page<PostEntry>,
}

#[derive(Template)]
#[template(path = "posts/post_detail.html")]
pub struct PostDetailTemplate {
    pub user: Option<CurrentUser>,
    pub entry: PostEntry,
    pub can_edit: bool,
}

/// One option in the group select.
pub struct GroupChoice {
    pub id: String,
    pub title: String,
    pub selected: bool,
}

impl GroupChoice {
    pub fn build(groups: &[Group], selected: &str) -> Vec<GroupChoice> {
        groups
            .iter()
            .map(|g| {
                let id = g.id.to_string();
                GroupChoice {
                    selected: id == selected,
                    id,
                    title: g.title.clone(),
                }
            })
            .collect()
    }
}

/// The post form's field values and errors as the template shows them.
/// The selected group is carried by [`GroupChoice`], not here.
pub struct PostFormContext {
    pub text: String,
    pub text_error: Option<String>,
    pub group_error: Option<String>,
}

impl PostFormContext {
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            text_error: None,
            group_error: None,
        }
    }

    /// Redisplay a rejected submission with its errors.
    pub fn from_form(form: &PostForm, errors: PostFormErrors) -> Self {
        Self {
            text: form.text.clone(),
            text_error: errors.text,
            group_error: errors.group,
        }
    }

    /// Pre-fill the edit form with the post's current values.
    pub fn from_post(post: &Post) -> Self {
        Self {
            text: post.text.clone(),
            text_error: None,
            group_error: None,
        }
    }
}

/// Shared by the create and edit views, like the single template the pages
/// render.
#[derive(Template)]
#[template(path = "posts/create_post.html")]
pub struct PostFormTemplate {
    pub user: Option<CurrentUser>,
    pub form: PostFormContext,
    pub choices: Vec<GroupChoice>,
    pub editing: bool,
    pub action: String,
}

#[derive(Template)]
#[template(path = "users/login.html")]
pub struct LoginTemplate {
    pub user: Option<CurrentUser>,
    pub next: String,
    pub username: String,
    pub error: Option<String>,
}
