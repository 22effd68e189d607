#![allow(dead_code)]

use linkup_db::models::user::{CreateUser, User};
use linkup_db::repositories::UserRepo;
use sqlx::PgPool;

/// Insert a user (and its empty profile) with a placeholder password hash.
pub async fn new_user(pool: &PgPool, username: &str) -> User {
    let input = CreateUser {
        name: format!("{username} test"),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$placeholder$placeholder".to_string(),
    };
    UserRepo::create_with_profile(pool, &input)
        .await
        .expect("user creation should succeed")
}
