//! Integration tests for countries, brands, country control and users.

use catalog_db::models::user::CreateUser;
use catalog_db::repositories::{BrandRepo, CountryControlRepo, CountryRepo, UserRepo};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_country_crud(pool: PgPool) {
    let spain = CountryRepo::create(&pool, "Spain").await.unwrap();
    CountryRepo::create(&pool, "Austria").await.unwrap();

    let names: Vec<_> = CountryRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Austria", "Spain"]);

    let renamed = CountryRepo::update(&pool, spain.id, "España")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "España");
    assert!(CountryRepo::update(&pool, 9999, "X").await.unwrap().is_none());

    assert!(CountryRepo::delete(&pool, spain.id).await.unwrap());
    assert!(CountryRepo::find_by_id(&pool, spain.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_brand_names_are_unique(pool: PgPool) {
    BrandRepo::create(&pool, "Acme").await.unwrap();
    let err = BrandRepo::create(&pool, "Acme").await.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_country_control_defaults_and_upsert(pool: PgPool) {
    let spain = CountryRepo::create(&pool, "Spain").await.unwrap();
    let italy = CountryRepo::create(&pool, "Italy").await.unwrap();

    let all = CountryControlRepo::list(&pool).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|c| !c.is_controlled));

    let set = CountryControlRepo::upsert(&pool, spain.id, true).await.unwrap();
    assert_eq!(set.id, spain.id);
    assert_eq!(set.name, "Spain");
    assert!(set.is_controlled);

    // Second write updates the same row.
    let cleared = CountryControlRepo::upsert(&pool, spain.id, false).await.unwrap();
    assert!(!cleared.is_controlled);
    CountryControlRepo::upsert(&pool, italy.id, true).await.unwrap();

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM country_controls")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 2);

    let err = CountryControlRepo::upsert(&pool, 9999, true).await.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_lookup_and_password_change(pool: PgPool) {
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            username: "admin".to_string(),
            password_hash: "hash-1".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);

    let found = UserRepo::find_by_username(&pool, "admin").await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert!(UserRepo::find_by_username(&pool, "Admin").await.unwrap().is_none());

    assert!(UserRepo::update_password(&pool, user.id, "hash-2").await.unwrap());
    let found = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(found.password_hash, "hash-2");

    assert!(!UserRepo::update_password(&pool, user.id + 1, "hash-3").await.unwrap());
}
