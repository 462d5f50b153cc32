//! Integration tests for the category tree repository.

use assert_matches::assert_matches;
use catalog_core::category_tree::build_forest;
use catalog_core::error::CoreError;
use catalog_db::models::category::CategoryUpdate;
use catalog_db::repositories::CategoryRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_nests_into_forest(pool: PgPool) {
    let food = CategoryRepo::create(&pool, "Food", None).await.unwrap();
    let fruit = CategoryRepo::create(&pool, "Fruit", Some(food.id)).await.unwrap();
    CategoryRepo::create(&pool, "Apples", Some(fruit.id)).await.unwrap();
    CategoryRepo::create(&pool, "Tools", None).await.unwrap();

    let forest = build_forest(CategoryRepo::list(&pool).await.unwrap());
    assert_eq!(forest.len(), 2);
    assert_eq!(forest[0].item.name, "Food");
    assert_eq!(forest[0].children[0].item.name, "Fruit");
    assert_eq!(forest[0].children[0].children[0].item.name, "Apples");
    assert!(forest[1].children.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_unknown_parent_fails(pool: PgPool) {
    let err = CategoryRepo::create(&pool, "Orphan", Some(9999))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_cascades_to_subtree(pool: PgPool) {
    let root = CategoryRepo::create(&pool, "Root", None).await.unwrap();
    let child = CategoryRepo::create(&pool, "Child", Some(root.id)).await.unwrap();
    let grandchild = CategoryRepo::create(&pool, "Grandchild", Some(child.id))
        .await
        .unwrap();
    let other = CategoryRepo::create(&pool, "Other", None).await.unwrap();

    assert!(CategoryRepo::delete(&pool, root.id).await.unwrap());

    assert!(CategoryRepo::find_by_id(&pool, child.id).await.unwrap().is_none());
    assert!(CategoryRepo::find_by_id(&pool, grandchild.id)
        .await
        .unwrap()
        .is_none());
    assert!(CategoryRepo::find_by_id(&pool, other.id).await.unwrap().is_some());
    assert!(!CategoryRepo::delete(&pool, root.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_moves_and_renames(pool: PgPool) {
    let a = CategoryRepo::create(&pool, "A", None).await.unwrap();
    let b = CategoryRepo::create(&pool, "B", None).await.unwrap();

    let result = CategoryRepo::update(&pool, b.id, "B2", Some(a.id))
        .await
        .unwrap();
    let CategoryUpdate::Updated(moved) = result else {
        panic!("expected update, got {result:?}");
    };
    assert_eq!(moved.name, "B2");
    assert_eq!(moved.parent_id, Some(a.id));

    let result = CategoryRepo::update(&pool, b.id, "B2", None).await.unwrap();
    assert_matches!(result, CategoryUpdate::Updated(c) if c.parent_id.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_rejects_cycles(pool: PgPool) {
    let a = CategoryRepo::create(&pool, "A", None).await.unwrap();
    let b = CategoryRepo::create(&pool, "B", Some(a.id)).await.unwrap();
    let c = CategoryRepo::create(&pool, "C", Some(b.id)).await.unwrap();

    let result = CategoryRepo::update(&pool, a.id, "A", Some(c.id)).await.unwrap();
    assert_matches!(result, CategoryUpdate::Rejected(CoreError::Cycle(_)));

    let result = CategoryRepo::update(&pool, a.id, "A", Some(a.id)).await.unwrap();
    assert_matches!(result, CategoryUpdate::Rejected(CoreError::Cycle(_)));

    // Nothing changed.
    let a_after = CategoryRepo::find_by_id(&pool, a.id).await.unwrap().unwrap();
    assert_eq!(a_after.parent_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_reports_missing_rows(pool: PgPool) {
    let a = CategoryRepo::create(&pool, "A", None).await.unwrap();

    let result = CategoryRepo::update(&pool, 9999, "X", None).await.unwrap();
    assert_matches!(result, CategoryUpdate::NotFound);

    let result = CategoryRepo::update(&pool, a.id, "A", Some(9999)).await.unwrap();
    assert_matches!(result, CategoryUpdate::ParentNotFound(9999));
}
