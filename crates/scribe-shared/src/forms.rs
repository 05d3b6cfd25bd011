//! Browser-submitted forms.
//!
//! Forms arrive urlencoded; an empty string in the group select means
//! "no group". Validation produces per-field errors the templates render
//! back next to the inputs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The post create/edit form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostForm {
    pub text: String,
    #[serde(default)]
    pub group: String,
}

/// Validated post form content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInput {
    pub text: String,
    pub group_id: Option<Uuid>,
}

/// Per-field validation errors for [`PostForm`].
#[derive(Debug, Clone, Default)]
pub struct PostFormErrors {
    pub text: Option<String>,
    pub group: Option<String>,
}

impl PostFormErrors {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.group.is_none()
    }
}

impl PostForm {
    /// Validate the form: text must be non-empty after trimming, group must
    /// be empty or a well-formed id. Whether the group actually exists is
    /// checked against the store by the handler.
    pub fn validate(&self) -> Result<PostInput, PostFormErrors> {
        let mut errors = PostFormErrors::default();

        let text = self.text.trim();
        if text.is_empty() {
            errors.text = Some("This field is required.".to_string());
        }

        let group_id = match self.group.trim() {
            "" => None,
            raw => match Uuid::parse_str(raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.group = Some("Select a valid choice.".to_string());
                    None
                }
            },
        };

        if errors.is_empty() {
            Ok(PostInput {
                text: text.to_string(),
                group_id,
            })
        } else {
            Err(errors)
        }
    }
}

/// The login form. `next` carries the originally requested path through the
/// login flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub next: String,
}

impl LoginForm {
    /// Where to go after a successful login. Only in-site paths are
    /// honored; anything else falls back to the index.
    pub fn redirect_target(&self) -> &str {
        if self.next.starts_with('/') && !self.next.starts_with("//") {
            &self.next
        } else {
            "/"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_form_with_group() {
        let group_id = Uuid::new_v4();
        let form = PostForm {
            text: "A perfectly fine post".to_string(),
            group: group_id.to_string(),
        };

        let input = form.validate().unwrap();
        assert_eq!(input.text, "A perfectly fine post");
        assert_eq!(input.group_id, Some(group_id));
    }

    #[test]
    fn empty_group_means_none() {
        let form = PostForm {
            text: "No group here".to_string(),
            group: String::new(),
        };

        assert_eq!(form.validate().unwrap().group_id, None);
    }

    #[test]
    fn empty_text_is_rejected() {
        let form = PostForm::default();

        let errors = form.validate().unwrap_err();
        assert!(errors.text.is_some());
    }

    #[test]
    fn whitespace_only_text_is_rejected() {
        let form = PostForm {
            text: "   \n\t ".to_string(),
            group: String::new(),
        };

        assert!(form.validate().unwrap_err().text.is_some());
    }

    #[test]
    fn text_is_trimmed() {
        let form = PostForm {
            text: "  padded  ".to_string(),
            group: String::new(),
        };

        assert_eq!(form.validate().unwrap().text, "padded");
    }

    #[test]
    fn malformed_group_id_is_rejected() {
        let form = PostForm {
            text: "Text is fine".to_string(),
            group: "not-a-uuid".to_string(),
        };

        assert!(form.validate().unwrap_err().group.is_some());
    }

    #[test]
    fn login_redirect_defaults_to_index() {
        let form = LoginForm::default();
        assert_eq!(form.redirect_target(), "/");

        let form = LoginForm {
            next: "/create/".to_string(),
            ..Default::default()
        };
        assert_eq!(form.redirect_target(), "/create/");
    }

    #[test]
    fn offsite_redirects_are_not_honored() {
        for next in ["https://evil.example", "//evil.example", "evil"] {
            let form = LoginForm {
                next: next.to_string(),
                ..Default::default()
            };
            assert_eq!(form.redirect_target(), "/");
        }
    }
}
