//! Integration tests for nomenclature items and listings.

use catalog_core::listing::ListingType;
use catalog_core::seasonality::{DayRange, Seasonality};
use catalog_db::models::nomenclature::{NewListing, NewNomenclature};
use catalog_db::repositories::{BrandRepo, CountryRepo, NomenclatureRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn listing(country_id: i64, brand_id: Option<i64>, sku: &str) -> NewListing {
    NewListing {
        country_id,
        brand_id,
        sku_code: sku.to_string(),
        listing_type: ListingType::Regular,
        is_new_until: None,
        seasonality: None,
    }
}

fn item(name: &str, listings: Vec<NewListing>) -> NewNomenclature {
    NewNomenclature {
        name: name.to_string(),
        listings,
    }
}

async fn item_count(pool: &PgPool) -> i64 {
    row_count(pool, "nomenclature_items").await
}

async fn row_count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Item, listing and listing period row counts.
async fn catalog_rows(pool: &PgPool) -> (i64, i64, i64) {
    (
        row_count(pool, "nomenclature_items").await,
        row_count(pool, "nomenclature_listings").await,
        row_count(pool, "nomenclature_listing_periods").await,
    )
}

fn with_periods(mut listing: NewListing, periods: Vec<DayRange>) -> NewListing {
    listing.seasonality = Some(Seasonality::Inline(periods));
    listing
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_inline_periods(pool: PgPool) {
    let spain = CountryRepo::create(&pool, "Spain").await.unwrap();
    let acme = BrandRepo::create(&pool, "Acme").await.unwrap();

    let mut regular = listing(spain.id, Some(acme.id), "SKU-1");
    regular.listing_type = ListingType::Exclusive;
    regular.seasonality = Some(Seasonality::Inline(vec![
        DayRange::new(1, 59),
        DayRange::new(306, 366),
    ]));

    let created = NomenclatureRepo::create(&pool, &item("Scarf", vec![regular]))
        .await
        .unwrap();
    assert_eq!(created.item.name, "Scarf");
    assert_eq!(created.countries.len(), 1);

    let view = &created.countries[0];
    assert_eq!(view.country_name, "Spain");
    assert_eq!(view.brand_name.as_deref(), Some("Acme"));
    assert_eq!(view.listing_type, "exclusive");
    assert_eq!(view.seasonality.template_id, None);
    assert_eq!(
        view.seasonality.periods,
        vec![DayRange::new(1, 59), DayRange::new(306, 366)]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_without_seasonality_is_year_round(pool: PgPool) {
    let france = CountryRepo::create(&pool, "France").await.unwrap();
    let created = NomenclatureRepo::create(&pool, &item("Salt", vec![listing(france.id, None, "S")]))
        .await
        .unwrap();
    assert!(created.countries[0].seasonality.periods.is_empty());
    assert_eq!(created.countries[0].brand_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_sku_rolls_back_whole_item(pool: PgPool) {
    let spain = CountryRepo::create(&pool, "Spain").await.unwrap();
    NomenclatureRepo::create(&pool, &item("First", vec![listing(spain.id, None, "DUP")]))
        .await
        .unwrap();
    assert_eq!(item_count(&pool).await, 1);

    let err = NomenclatureRepo::create(&pool, &item("Second", vec![listing(spain.id, None, "DUP")]))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));

    assert_eq!(item_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failing_last_listing_leaves_no_rows(pool: PgPool) {
    let spain = CountryRepo::create(&pool, "Spain").await.unwrap();
    let italy = CountryRepo::create(&pool, "Italy").await.unwrap();
    let france = CountryRepo::create(&pool, "France").await.unwrap();
    NomenclatureRepo::create(
        &pool,
        &item(
            "Existing",
            vec![with_periods(listing(france.id, None, "TAKEN"), vec![DayRange::new(1, 31)])],
        ),
    )
    .await
    .unwrap();
    let before = catalog_rows(&pool).await;
    assert_eq!(before, (1, 1, 1));

    let err = NomenclatureRepo::create(
        &pool,
        &item(
            "Doomed",
            vec![
                with_periods(
                    listing(spain.id, None, "D-ES"),
                    vec![DayRange::new(1, 59), DayRange::new(300, 366)],
                ),
                with_periods(listing(italy.id, None, "D-IT"), vec![DayRange::new(100, 120)]),
                listing(france.id, None, "TAKEN"),
            ],
        ),
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));

    assert_eq!(catalog_rows(&pool).await, before);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_update_keeps_previous_listings(pool: PgPool) {
    let spain = CountryRepo::create(&pool, "Spain").await.unwrap();
    let italy = CountryRepo::create(&pool, "Italy").await.unwrap();
    NomenclatureRepo::create(&pool, &item("Other", vec![listing(italy.id, None, "TAKEN")]))
        .await
        .unwrap();
    let created = NomenclatureRepo::create(
        &pool,
        &item(
            "Tea",
            vec![with_periods(listing(spain.id, None, "T-ES"), vec![DayRange::new(10, 20)])],
        ),
    )
    .await
    .unwrap();
    let id = created.item.id;
    let before = catalog_rows(&pool).await;

    let err = NomenclatureRepo::update(
        &pool,
        id,
        &item(
            "Green tea",
            vec![
                with_periods(listing(spain.id, None, "GT-ES"), vec![DayRange::new(200, 210)]),
                listing(italy.id, None, "TAKEN"),
            ],
        ),
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));

    assert_eq!(catalog_rows(&pool).await, before);
    let reread = NomenclatureRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(reread.item.name, "Tea");
    assert_eq!(reread.countries.len(), 1);
    assert_eq!(reread.countries[0].sku_code, "T-ES");
    assert_eq!(reread.countries[0].seasonality.periods, vec![DayRange::new(10, 20)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_same_sku_allowed_across_brands_and_countries(pool: PgPool) {
    let spain = CountryRepo::create(&pool, "Spain").await.unwrap();
    let italy = CountryRepo::create(&pool, "Italy").await.unwrap();
    let acme = BrandRepo::create(&pool, "Acme").await.unwrap();

    NomenclatureRepo::create(&pool, &item("A", vec![listing(spain.id, None, "X")]))
        .await
        .unwrap();
    NomenclatureRepo::create(&pool, &item("B", vec![listing(spain.id, Some(acme.id), "X")]))
        .await
        .unwrap();
    NomenclatureRepo::create(&pool, &item("C", vec![listing(italy.id, None, "X")]))
        .await
        .unwrap();
    assert_eq!(item_count(&pool).await, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_template_is_reference_error(pool: PgPool) {
    let spain = CountryRepo::create(&pool, "Spain").await.unwrap();
    let mut bad = listing(spain.id, None, "T");
    bad.seasonality = Some(Seasonality::Template(9999));

    let err = NomenclatureRepo::create(&pool, &item("Bad", vec![bad]))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));
    assert_eq!(item_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_listings(pool: PgPool) {
    let spain = CountryRepo::create(&pool, "Spain").await.unwrap();
    let italy = CountryRepo::create(&pool, "Italy").await.unwrap();

    let mut with_periods = listing(spain.id, None, "OLD");
    with_periods.seasonality = Some(Seasonality::Inline(vec![DayRange::new(10, 20)]));
    let created = NomenclatureRepo::create(&pool, &item("Tea", vec![with_periods]))
        .await
        .unwrap();
    let id = created.item.id;

    let updated = NomenclatureRepo::update(
        &pool,
        id,
        &item("Green tea", vec![listing(italy.id, None, "NEW")]),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.item.name, "Green tea");
    assert_eq!(updated.countries.len(), 1);
    assert_eq!(updated.countries[0].country_name, "Italy");
    assert_eq!(updated.countries[0].sku_code, "NEW");

    let orphan_periods: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM nomenclature_listing_periods")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(orphan_periods, 0);

    assert!(NomenclatureRepo::update(&pool, 9999, &item("Nope", vec![]))
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_country_removes_its_listings(pool: PgPool) {
    let spain = CountryRepo::create(&pool, "Spain").await.unwrap();
    let italy = CountryRepo::create(&pool, "Italy").await.unwrap();
    let created = NomenclatureRepo::create(
        &pool,
        &item(
            "Olive oil",
            vec![listing(spain.id, None, "O-ES"), listing(italy.id, None, "O-IT")],
        ),
    )
    .await
    .unwrap();

    assert!(CountryRepo::delete(&pool, spain.id).await.unwrap());

    let reread = NomenclatureRepo::find_by_id(&pool, created.item.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reread.countries.len(), 1);
    assert_eq!(reread.countries[0].country_name, "Italy");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_and_delete(pool: PgPool) {
    let spain = CountryRepo::create(&pool, "Spain").await.unwrap();
    let b = NomenclatureRepo::create(&pool, &item("B", vec![listing(spain.id, None, "B")]))
        .await
        .unwrap();
    NomenclatureRepo::create(&pool, &item("A", vec![]))
        .await
        .unwrap();

    let all = NomenclatureRepo::list(&pool).await.unwrap();
    let names: Vec<_> = all.iter().map(|i| i.item.name.as_str()).collect();
    assert_eq!(names, ["A", "B"]);
    assert!(all[0].countries.is_empty());
    assert_eq!(all[1].countries.len(), 1);

    assert!(NomenclatureRepo::delete(&pool, b.item.id).await.unwrap());
    assert!(!NomenclatureRepo::delete(&pool, b.item.id).await.unwrap());
    let listings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM nomenclature_listings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(listings, 0);
}
