//! Integration tests for auth users, profiles, passcodes and sessions.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use storefront_db::models::auth::{CreateOtpCode, CreateSession};
use storefront_db::models::profile::Role;
use storefront_db::repositories::{AuthUserRepo, OtpRepo, ProfileRepo, SessionRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, email: &str) -> uuid::Uuid {
    AuthUserRepo::find_or_create_by_email(pool, email)
        .await
        .unwrap()
        .id
}

async fn profile_count(pool: &PgPool, id: uuid::Uuid) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM profiles WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

// ---------------------------------------------------------------------------
// Auth users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_same_email_maps_to_one_identity(pool: PgPool) {
    let first = seed_user(&pool, "owner@shop.pk").await;
    let second = seed_user(&pool, "owner@shop.pk").await;
    assert_eq!(first, second);

    let found = AuthUserRepo::find_by_email(&pool, "owner@shop.pk").await.unwrap().unwrap();
    assert_eq!(found.id, first);
    assert!(found.last_sign_in_at.is_none());

    AuthUserRepo::record_sign_in(&pool, first).await.unwrap();
    let found = AuthUserRepo::find_by_id(&pool, first).await.unwrap().unwrap();
    assert!(found.last_sign_in_at.is_some());
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_first_lookup_provisions_user_role(pool: PgPool) {
    let id = seed_user(&pool, "new@shop.pk").await;

    let profile = ProfileRepo::find_or_provision(&pool, id).await.unwrap();
    assert_eq!(profile.role, Some(Role::User));
    assert!(!profile.is_admin());

    let again = ProfileRepo::find_or_provision(&pool, id).await.unwrap();
    assert_eq!(again, profile);
    assert_eq!(profile_count(&pool, id).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_first_lookups_create_one_profile(pool: PgPool) {
    let id = seed_user(&pool, "race@shop.pk").await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let pool = pool.clone();
            tokio::spawn(async move { ProfileRepo::find_or_provision(&pool, id).await })
        })
        .collect();

    for handle in handles {
        let profile = handle.await.unwrap().unwrap();
        assert_eq!(profile.role, Some(Role::User));
    }
    assert_eq!(profile_count(&pool, id).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_existing_null_role_is_kept(pool: PgPool) {
    let id = seed_user(&pool, "legacy@shop.pk").await;
    sqlx::query("INSERT INTO profiles (id, role) VALUES ($1, NULL)")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    let profile = ProfileRepo::find_or_provision(&pool, id).await.unwrap();
    assert_eq!(profile.role, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_granted_admin_role_survives_lookup(pool: PgPool) {
    let id = seed_user(&pool, "staff@shop.pk").await;
    ProfileRepo::find_or_provision(&pool, id).await.unwrap();
    sqlx::query("UPDATE profiles SET role = 'admin' WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    let profile = ProfileRepo::find_or_provision(&pool, id).await.unwrap();
    assert!(profile.is_admin());
    assert_eq!(profile_count(&pool, id).await, 1);
}

// ---------------------------------------------------------------------------
// One-time passcodes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_code_retires_previous_code(pool: PgPool) {
    let expires_at = Utc::now() + Duration::minutes(10);
    let first = OtpRepo::create(
        &pool,
        &CreateOtpCode {
            email: "a@shop.pk".into(),
            code_hash: "hash-1".into(),
            expires_at,
        },
    )
    .await
    .unwrap();
    let second = OtpRepo::create(
        &pool,
        &CreateOtpCode {
            email: "a@shop.pk".into(),
            code_hash: "hash-2".into(),
            expires_at,
        },
    )
    .await
    .unwrap();

    let active = OtpRepo::find_active(&pool, "a@shop.pk").await.unwrap().unwrap();
    assert_eq!(active.id, second.id);
    assert!(!OtpRepo::consume(&pool, first.id).await.unwrap());

    assert_eq!(OtpRepo::increment_attempts(&pool, second.id).await.unwrap(), 1);
    assert!(OtpRepo::consume(&pool, second.id).await.unwrap());
    assert!(!OtpRepo::consume(&pool, second.id).await.unwrap());
    assert!(OtpRepo::find_active(&pool, "a@shop.pk").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_codes_are_inactive_and_purged(pool: PgPool) {
    OtpRepo::create(
        &pool,
        &CreateOtpCode {
            email: "late@shop.pk".into(),
            code_hash: "hash".into(),
            expires_at: Utc::now() - Duration::minutes(1),
        },
    )
    .await
    .unwrap();

    assert!(OtpRepo::find_active(&pool, "late@shop.pk").await.unwrap().is_none());
    assert_eq!(OtpRepo::delete_expired(&pool).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_token_redeems_once(pool: PgPool) {
    let user_id = seed_user(&pool, "s@shop.pk").await;
    let session = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id,
            refresh_token_hash: "refresh-hash".into(),
            expires_at: Utc::now() + Duration::days(7),
        },
    )
    .await
    .unwrap();

    let redeemed = SessionRepo::redeem(&pool, "refresh-hash").await.unwrap().unwrap();
    assert_eq!(redeemed.id, session.id);
    assert!(redeemed.is_revoked);

    assert!(SessionRepo::redeem(&pool, "refresh-hash").await.unwrap().is_none());
    assert_eq!(SessionRepo::revoke_all_for_user(&pool, user_id).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_session_cannot_be_redeemed(pool: PgPool) {
    let user_id = seed_user(&pool, "old@shop.pk").await;
    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id,
            refresh_token_hash: "stale".into(),
            expires_at: Utc::now() - Duration::minutes(1),
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::redeem(&pool, "stale").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sign_out_revokes_every_session(pool: PgPool) {
    let user_id = seed_user(&pool, "many@shop.pk").await;
    for hash in ["one", "two"] {
        SessionRepo::create(
            &pool,
            &CreateSession {
                user_id,
                refresh_token_hash: hash.into(),
                expires_at: Utc::now() + Duration::days(1),
            },
        )
        .await
        .unwrap();
    }

    assert_eq!(SessionRepo::revoke_all_for_user(&pool, user_id).await.unwrap(), 2);
    assert!(SessionRepo::redeem(&pool, "two").await.unwrap().is_none());
}
