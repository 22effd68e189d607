//! Posts, the like-set, and comments.

mod common;

use common::new_user;
use linkup_core::post::MediaKind;
use linkup_db::models::post::CreatePost;
use linkup_db::repositories::{CommentRepo, PostRepo};
use sqlx::PgPool;

async fn new_post(pool: &PgPool, author_id: i64, body: &str) -> i64 {
    PostRepo::create(
        pool,
        &CreatePost {
            author_id,
            body: body.to_string(),
            media: None,
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_stores_media_kind(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let post = PostRepo::create(
        &pool,
        &CreatePost {
            author_id: alice.id,
            body: "slides".to_string(),
            media: Some(("deck.pdf".to_string(), MediaKind::Document)),
        },
    )
    .await
    .unwrap();

    assert_eq!(post.media.as_deref(), Some("deck.pdf"));
    assert_eq!(post.file_type.as_deref(), Some("document"));
    assert!(post.is_active);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn toggle_like_flips_membership(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    let post_id = new_post(&pool, alice.id, "hello").await;

    let first = PostRepo::toggle_like(&pool, post_id, bob.id).await.unwrap().unwrap();
    assert!(first.liked);
    assert_eq!(first.like_count, 1);

    let second = PostRepo::toggle_like(&pool, post_id, bob.id).await.unwrap().unwrap();
    assert!(!second.liked);
    assert_eq!(second.like_count, 0);

    let view = PostRepo::find_view(&pool, post_id).await.unwrap().unwrap();
    assert!(view.liked_by.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_likes_never_duplicate(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    let post_id = new_post(&pool, alice.id, "race").await;

    let (a, b) = tokio::join!(
        PostRepo::toggle_like(&pool, post_id, bob.id),
        PostRepo::toggle_like(&pool, post_id, alice.id),
    );
    a.unwrap();
    b.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM post_likes WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn soft_delete_hides_post(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let post_id = new_post(&pool, alice.id, "temporary").await;

    assert!(PostRepo::soft_delete(&pool, post_id).await.unwrap());
    assert!(!PostRepo::soft_delete(&pool, post_id).await.unwrap());

    assert!(PostRepo::find_active(&pool, post_id).await.unwrap().is_none());
    assert!(PostRepo::list_active(&pool).await.unwrap().is_empty());
    assert!(PostRepo::toggle_like(&pool, post_id, alice.id).await.unwrap().is_none());

    // The row itself is kept.
    let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM posts WHERE id = $1)")
        .bind(post_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(exists);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn author_listing_and_comment_counts(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    let alices = new_post(&pool, alice.id, "by alice").await;
    new_post(&pool, bob.id, "by bob").await;

    CommentRepo::create(&pool, alices, bob.id, "nice").await.unwrap();
    CommentRepo::create(&pool, alices, alice.id, "thanks").await.unwrap();

    let posts = PostRepo::list_by_author(&pool, alice.id).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].comment_count, 2);
    assert_eq!(posts[0].author.username, "alice");

    let comments = CommentRepo::list_for_post(&pool, alices).await.unwrap();
    assert_eq!(comments[0].body, "nice");
    assert_eq!(comments[0].author.id, bob.id);
    assert_eq!(comments[1].body, "thanks");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_comment_reports_presence(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let post_id = new_post(&pool, alice.id, "post").await;
    let comment = CommentRepo::create(&pool, post_id, alice.id, "oops").await.unwrap();

    assert!(CommentRepo::delete(&pool, comment.id).await.unwrap());
    assert!(!CommentRepo::delete(&pool, comment.id).await.unwrap());
    assert!(CommentRepo::find_by_id(&pool, comment.id).await.unwrap().is_none());
}
