use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Group, User};

/// Number of characters shown when a post is displayed in short form.
pub const PREVIEW_CHARS: usize = 15;

/// Post entity - a text entry published by a user, optionally in a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}

impl Post {
    /// Create a new post. The author and publication date are fixed here
    /// and never change afterwards.
    pub fn new(author_id: Uuid, text: String, group_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            group_id,
            text,
            pub_date: Utc::now(),
        }
    }

    /// Apply an edit. Only text and group are mutable; author and pub_date
    /// stay as set at creation.
    pub fn edit(&mut self, text: String, group_id: Option<Uuid>) {
        self.text = text;
        self.group_id = group_id;
    }

    /// First [`PREVIEW_CHARS`] characters of the text, counted char-wise so
    /// multibyte text truncates cleanly.
    pub fn preview(&self) -> String {
        self.text.chars().take(PREVIEW_CHARS).collect()
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preview())
    }
}

/// A post joined with its author and optional group, as read views need it.
#[derive(Debug, Clone)]
pub struct PostEntry {
    pub post: Post,
    pub author: User,
    pub group: Option<Group>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_first_fifteen_chars() {
        let post = Post::new(
            Uuid::new_v4(),
            "A test post that is longer than fifteen characters".to_string(),
            None,
        );

        assert_eq!(post.to_string(), "A test post tha");
    }

    #[test]
    fn preview_counts_chars_not_bytes() {
        let post = Post::new(
            Uuid::new_v4(),
            "Тестовый пост, который длиннее 15 символов".to_string(),
            None,
        );

        assert_eq!(post.preview(), "Тестовый пост, ");
        assert_eq!(post.preview().chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn short_text_previews_whole() {
        let post = Post::new(Uuid::new_v4(), "short".to_string(), None);
        assert_eq!(post.to_string(), "short");
    }

    #[test]
    fn edit_keeps_author_and_pub_date() {
        let author = Uuid::new_v4();
        let group = Uuid::new_v4();
        let mut post = Post::new(author, "original".to_string(), None);
        let pub_date = post.pub_date;

        post.edit("changed".to_string(), Some(group));

        assert_eq!(post.text, "changed");
        assert_eq!(post.group_id, Some(group));
        assert_eq!(post.author_id, author);
        assert_eq!(post.pub_date, pub_date);
    }
}
