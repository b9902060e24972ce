//! Data models for Quill records.

use std::borrow::Cow;

use quill_core::ValidationError;
use quill_core::validation::{normalize_email, validate_email, validate_name, validate_non_empty};
use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordId};

pub const POST_TITLE_MIN_CHARS: usize = 5;

// =========================================================================
// Messages
// =========================================================================

/// A chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: RecordId,
    pub username: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Message {
    /// Build an unsaved message; the store assigns id and timestamps.
    pub fn new(username: &str, content: &str) -> Result<Self, ValidationError> {
        validate_non_empty("username", username)?;
        validate_non_empty("content", content)?;
        Ok(Self {
            id: 0,
            username: username.to_string(),
            content: content.to_string(),
            created_at: 0,
            updated_at: 0,
        })
    }
}

/// Replacement content for a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePatch {
    pub content: String,
}

impl Record for Message {
    type Patch = MessagePatch;
    const KIND: &'static str = "message";

    fn owner(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.username)
    }

    fn stamp(&mut self, id: RecordId, now: i64) {
        self.id = id;
        self.created_at = now;
        self.updated_at = now;
    }

    fn apply(&mut self, patch: MessagePatch, now: i64) -> Result<(), ValidationError> {
        validate_non_empty("content", &patch.content)?;
        self.content = patch.content;
        self.updated_at = now;
        Ok(())
    }
}

// =========================================================================
// Users
// =========================================================================

/// A registered user. The password hash never leaves the process through
/// serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl User {
    /// Build an unsaved user from raw input. Email is trimmed and lowercased,
    /// name is trimmed.
    pub fn new(email: &str, name: &str, password_hash: &str) -> Result<Self, ValidationError> {
        validate_email(email)?;
        validate_name(name)?;
        validate_non_empty("password_hash", password_hash)?;
        Ok(Self {
            id: 0,
            email: normalize_email(email),
            name: name.trim().to_string(),
            password_hash: password_hash.to_string(),
            created_at: 0,
            updated_at: 0,
        })
    }
}

/// Partial update of a user; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip)]
    pub password_hash: Option<String>,
}

impl UserPatch {
    /// Check every provided field without touching a record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(hash) = &self.password_hash {
            validate_non_empty("password_hash", hash)?;
        }
        Ok(())
    }
}

impl Record for User {
    type Patch = UserPatch;
    const KIND: &'static str = "user";

    fn owner(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.email)
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.email)
    }

    fn stamp(&mut self, id: RecordId, now: i64) {
        self.id = id;
        self.created_at = now;
        self.updated_at = now;
    }

    fn apply(&mut self, patch: UserPatch, now: i64) -> Result<(), ValidationError> {
        patch.validate()?;
        if let Some(email) = patch.email {
            self.email = normalize_email(&email);
        }
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(hash) = patch.password_hash {
            self.password_hash = hash;
        }
        self.updated_at = now;
        Ok(())
    }
}

// =========================================================================
// Posts
// =========================================================================

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: RecordId,
    pub user_id: RecordId,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Payload for creating a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub user_id: RecordId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub published: bool,
}

/// Partial update of a post; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl Post {
    pub fn new(new: NewPost) -> Result<Self, ValidationError> {
        let post = Self {
            id: 0,
            user_id: new.user_id,
            title: new.title,
            content: new.content,
            published: new.published,
            created_at: 0,
            updated_at: 0,
        };
        post.validate()?;
        Ok(post)
    }

    /// Title of at least five characters, positive author id, and content
    /// whenever the post is published.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().chars().count() < POST_TITLE_MIN_CHARS {
            return Err(ValidationError::InvalidLength {
                field: "title",
                min: POST_TITLE_MIN_CHARS,
                max: None,
            });
        }
        if self.published && self.content.trim().is_empty() {
            return Err(ValidationError::InvalidFormat {
                field: "content",
                reason: "cannot be empty for a published post",
            });
        }
        if self.user_id <= 0 {
            return Err(ValidationError::InvalidFormat {
                field: "user_id",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

impl Record for Post {
    type Patch = PostPatch;
    const KIND: &'static str = "post";

    fn owner(&self) -> Cow<'_, str> {
        Cow::Owned(self.user_id.to_string())
    }

    fn stamp(&mut self, id: RecordId, now: i64) {
        self.id = id;
        self.created_at = now;
        self.updated_at = now;
    }

    fn apply(&mut self, patch: PostPatch, now: i64) -> Result<(), ValidationError> {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(published) = patch.published {
            self.published = published;
        }
        self.validate()?;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn message_requires_username_and_content() {
        assert_eq!(
            Message::new("", "hi"),
            Err(ValidationError::EmptyInput { field: "username" })
        );
        assert_eq!(
            Message::new("alice", "  "),
            Err(ValidationError::EmptyInput { field: "content" })
        );
        assert!(Message::new("alice", "hi").is_ok());
    }

    #[test]
    fn user_is_normalized() {
        let user = User::new("  Alice@Example.com ", "  Alice ", "$argon2id$x").unwrap();
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.name, "Alice");
    }

    #[test]
    fn user_serialization_omits_password_hash() {
        let user = User::new("alice@example.com", "Alice", "$argon2id$secret").unwrap();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("secret"));
    }

    #[test]
    fn user_patch_validates_provided_fields_only() {
        assert!(UserPatch::default().validate().is_ok());
        let patch = UserPatch {
            name: Some("X".into()),
            ..UserPatch::default()
        };
        assert!(matches!(
            patch.validate(),
            Err(ValidationError::InvalidLength { field: "name", .. })
        ));
    }

    #[test]
    fn post_rules() {
        let ok = NewPost {
            user_id: 1,
            title: "Hello world".into(),
            content: String::new(),
            published: false,
        };
        assert!(Post::new(ok.clone()).is_ok());

        let short = NewPost {
            title: "Hey".into(),
            ..ok.clone()
        };
        assert!(matches!(
            Post::new(short),
            Err(ValidationError::InvalidLength { field: "title", .. })
        ));

        let published_empty = NewPost {
            published: true,
            ..ok.clone()
        };
        assert!(matches!(
            Post::new(published_empty),
            Err(ValidationError::InvalidFormat { field: "content", .. })
        ));

        let orphan = NewPost { user_id: 0, ..ok };
        assert!(matches!(
            Post::new(orphan),
            Err(ValidationError::InvalidFormat { field: "user_id", .. })
        ));
    }

    #[test]
    fn post_patch_is_validated_after_merge() {
        let mut post = Post::new(NewPost {
            user_id: 1,
            title: "Draft title".into(),
            content: String::new(),
            published: false,
        })
        .unwrap();

        let publish = PostPatch {
            published: Some(true),
            ..PostPatch::default()
        };
        assert!(post.clone().apply(publish, 10).is_err());

        let publish_with_body = PostPatch {
            content: Some("body".into()),
            published: Some(true),
            ..PostPatch::default()
        };
        post.apply(publish_with_body, 10).unwrap();
        assert!(post.published);
        assert_eq!(post.updated_at, 10);
    }
}
