//! Tests for the repository facades.

use quill_core::ValidationError;

use super::{ErrorKind, MessageRepository, PostRepository, RepositoryError, UserRepository};
use crate::models::{NewPost, PostPatch, UserPatch};

const HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$ZGlnZXN0";

// === Messages ===

#[test]
fn message_create_validates_before_storing() {
    let repo = MessageRepository::in_memory();

    let err = repo.create("alice", "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyInput);
    assert_eq!(repo.count().unwrap(), 0);

    // A rejected payload does not burn an identifier.
    assert_eq!(repo.create("alice", "hi").unwrap().id, 1);
}

#[test]
fn message_lifecycle() {
    let repo = MessageRepository::in_memory();
    let m = repo.create("alice", "hi").unwrap();

    let updated = repo.update(m.id, "hello").unwrap();
    assert_eq!(updated.content, "hello");
    assert_eq!(repo.get(m.id).unwrap().content, "hello");

    repo.delete(m.id).unwrap();
    assert!(repo.get(m.id).unwrap_err().is_not_found());
    assert!(repo.delete(m.id).unwrap_err().is_not_found());
}

#[test]
fn message_update_with_blank_content_is_invalid() {
    let repo = MessageRepository::in_memory();
    let m = repo.create("alice", "hi").unwrap();

    let err = repo.update(m.id, "   ").unwrap_err();
    assert_eq!(
        err,
        RepositoryError::Invalid(ValidationError::EmptyInput { field: "content" })
    );
}

#[test]
fn messages_by_user() {
    let repo = MessageRepository::in_memory();
    repo.create("alice", "one").unwrap();
    repo.create("bob", "two").unwrap();

    assert_eq!(repo.list_by_user("alice").unwrap().len(), 1);
    assert_eq!(repo.list().unwrap().len(), 2);
    assert_eq!(
        repo.list_by_user("carol").unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

// === Users ===

#[test]
fn user_create_normalizes_and_enforces_unique_email() {
    let repo = UserRepository::in_memory();
    let alice = repo.create(" Alice@Example.com ", "Alice", HASH).unwrap();
    assert_eq!(alice.email, "alice@example.com");

    let err = repo.create("alice@example.com", "Other", HASH).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
}

#[test]
fn user_create_rejects_bad_fields() {
    let repo = UserRepository::in_memory();
    assert_eq!(
        repo.create("not-an-email", "Alice", HASH).unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
    assert_eq!(
        repo.create("alice@example.com", "A", HASH).unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
    assert_eq!(
        repo.create("", "Alice", HASH).unwrap_err().kind(),
        ErrorKind::EmptyInput
    );
    assert_eq!(repo.count().unwrap(), 0);
}

#[test]
fn user_lookup_by_email_ignores_case() {
    let repo = UserRepository::in_memory();
    let alice = repo.create("alice@example.com", "Alice", HASH).unwrap();

    assert_eq!(repo.get_by_email("ALICE@example.COM").unwrap().id, alice.id);
    assert!(repo.get_by_email("bob@example.com").unwrap_err().is_not_found());
}

#[test]
fn user_update_helpers() {
    let repo = UserRepository::in_memory();
    let alice = repo.create("alice@example.com", "Alice", HASH).unwrap();

    let renamed = repo.update_name(alice.id, "  Alicia ").unwrap();
    assert_eq!(renamed.name, "Alicia");

    let moved = repo.update_email(alice.id, "alicia@example.com").unwrap();
    assert_eq!(moved.email, "alicia@example.com");

    assert_eq!(
        repo.update_name(alice.id, "x").unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
    assert_eq!(
        repo.update_email(alice.id, "nope").unwrap_err().kind(),
        ErrorKind::InvalidInput
    );

    let rehashed = repo.set_password_hash(alice.id, "$argon2id$new").unwrap();
    assert_eq!(rehashed.password_hash, "$argon2id$new");
    assert_eq!(rehashed.name, "Alicia");
}

#[test]
fn user_update_missing_is_not_found() {
    let repo = UserRepository::in_memory();
    let err = repo
        .update(
            42,
            UserPatch {
                name: Some("Valid Name".into()),
                ..UserPatch::default()
            },
        )
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn deleted_user_frees_email() {
    let repo = UserRepository::in_memory();
    let alice = repo.create("alice@example.com", "Alice", HASH).unwrap();
    repo.delete(alice.id).unwrap();

    let again = repo.create("alice@example.com", "Alice", HASH).unwrap();
    assert_eq!(again.id, 2);
}

// === Posts ===

fn new_post(user_id: i64, title: &str) -> NewPost {
    NewPost {
        user_id,
        title: title.into(),
        content: String::new(),
        published: false,
    }
}

#[test]
fn post_create_and_filter_by_author() {
    let repo = PostRepository::in_memory();
    repo.create(new_post(1, "First post")).unwrap();
    repo.create(new_post(2, "Second post")).unwrap();
    repo.create(new_post(1, "Third post")).unwrap();

    let ids: Vec<_> = repo
        .list_by_user(1)
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(repo.list_by_user(3).unwrap_err().is_not_found());
}

#[test]
fn post_create_rejects_invalid_payload() {
    let repo = PostRepository::in_memory();
    assert_eq!(
        repo.create(new_post(1, "Hi")).unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
    assert_eq!(
        repo.create(new_post(0, "Valid title")).unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
}

#[test]
fn post_patch_cannot_publish_without_content() {
    let repo = PostRepository::in_memory();
    let post = repo.create(new_post(1, "Draft post")).unwrap();

    let err = repo
        .update(
            post.id,
            PostPatch {
                published: Some(true),
                ..PostPatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(!repo.get(post.id).unwrap().published);

    let published = repo
        .update(
            post.id,
            PostPatch {
                content: Some("Body text".into()),
                published: Some(true),
                ..PostPatch::default()
            },
        )
        .unwrap();
    assert!(published.published);
    assert_eq!(published.title, "Draft post");
}

#[test]
fn post_delete_then_count() {
    let repo = PostRepository::in_memory();
    let post = repo.create(new_post(1, "Short lived")).unwrap();
    assert_eq!(repo.count().unwrap(), 1);
    repo.delete(post.id).unwrap();
    assert_eq!(repo.count().unwrap(), 0);
    assert!(repo.list().unwrap().is_empty());
}

// === Error classification ===

#[test]
fn store_errors_map_onto_kinds() {
    use crate::error::StoreError;

    let cases = [
        (StoreError::NotFound("user 1".into()), ErrorKind::NotFound),
        (
            StoreError::AlreadyExists("user with key a@b.co".into()),
            ErrorKind::AlreadyExists,
        ),
        (
            StoreError::Rejected(ValidationError::EmptyInput { field: "content" }),
            ErrorKind::EmptyInput,
        ),
        (
            StoreError::Rejected(ValidationError::InvalidFormat {
                field: "email",
                reason: "expected local@domain.tld",
            }),
            ErrorKind::InvalidInput,
        ),
    ];
    for (err, kind) in cases {
        assert_eq!(RepositoryError::from(err).kind(), kind);
    }
}
