//! Transaction boundaries: commit, rollback and service atomicity.
//!
//! Run with: `cargo test -p catalog-integration-tests --test unit_of_work -- --ignored`

#![allow(clippy::unwrap_used)]

use catalog_api::db::{RepositoryError, UnitOfWork, attributes, ensure_affected, products, variants};
use catalog_api::models::{Attribute, Variant};
use catalog_api::services::{ProductService, VariantService};
use catalog_core::{Price, ProductId, VariantId};
use catalog_integration_tests::{product_at, row_count};
use sqlx::PgPool;

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_committed_write_is_visible(pool: PgPool) {
    let product = product_at("Mug", 0);

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    products::save(uow.conn(), &product).await.unwrap();
    uow.commit().await.unwrap();

    let stored = products::get_by_id(&pool, product.id).await.unwrap();
    assert_eq!(stored.name, "Mug");
    assert_eq!(stored.price, Price::from_cents(1999));
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_failed_unit_rolls_back_earlier_writes(pool: PgPool) {
    let first = product_at("First", 0);
    let second = product_at("Second", 1);

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let result = async {
        products::save(uow.conn(), &first).await?;
        products::save(uow.conn(), &second).await?;
        // Same primary key again.
        products::save(uow.conn(), &first).await?;
        Ok::<_, RepositoryError>(())
    }
    .await;
    let err = uow.finish(result).await.unwrap_err();

    assert!(matches!(err, RepositoryError::Conflict(_)), "{err:?}");
    assert_eq!(row_count(&pool, "product").await.unwrap(), 0);
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_explicit_rollback_returns_cause(pool: PgPool) {
    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    products::save(uow.conn(), &product_at("Mug", 0)).await.unwrap();
    let err = uow.rollback(RepositoryError::NotFound).await;

    assert!(matches!(err, RepositoryError::NotFound));
    assert_eq!(row_count(&pool, "product").await.unwrap(), 0);
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_dropped_unit_rolls_back(pool: PgPool) {
    {
        let mut uow = UnitOfWork::begin(&pool).await.unwrap();
        products::save(uow.conn(), &product_at("Mug", 0)).await.unwrap();
    }

    assert_eq!(row_count(&pool, "product").await.unwrap(), 0);
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_variant_of_missing_product_leaves_nothing(pool: PgPool) {
    let service = VariantService::new(pool.clone());

    let err = service
        .create_variant("Large", "", Price::from_cents(2500), ProductId::generate())
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound));
    assert_eq!(row_count(&pool, "variant").await.unwrap(), 0);
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_variant_store_rejects_unknown_product(pool: PgPool) {
    let variant = Variant::new(ProductId::generate(), "Large", "", Price::from_cents(2500));
    let err = variants::save(&pool, &variant).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)), "{err:?}");
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_edit_and_delete_of_missing_rows_affect_nothing(pool: PgPool) {
    let mut ghost = product_at("Ghost", 0);
    ghost.edit("Still a ghost", "", Price::from_cents(100));
    assert_eq!(products::edit(&pool, &ghost).await.unwrap(), 0);

    ghost.retire();
    let affected = products::delete(&pool, &ghost).await.unwrap();
    assert!(matches!(ensure_affected(affected), Err(RepositoryError::NotFound)));
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_deleted_rows_cannot_be_edited_or_deleted_again(pool: PgPool) {
    let mut attribute = Attribute::new("Colour");
    attributes::save(&pool, &attribute).await.unwrap();

    attribute.retire();
    assert_eq!(attributes::delete(&pool, &attribute).await.unwrap(), 1);
    assert_eq!(attributes::delete(&pool, &attribute).await.unwrap(), 0);

    attribute.rename("size");
    assert_eq!(attributes::edit(&pool, &attribute).await.unwrap(), 0);
    assert!(matches!(
        attributes::get_by_id(&pool, attribute.id).await,
        Err(RepositoryError::NotFound)
    ));
    // The row is kept as history.
    assert_eq!(row_count(&pool, "attribute").await.unwrap(), 1);
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_service_errors_for_missing_entities(pool: PgPool) {
    let product_service = ProductService::new(pool.clone());
    let variant_service = VariantService::new(pool.clone());
    let missing = ProductId::generate();

    assert!(matches!(
        product_service.update_product(missing, "x", "", Price::from_cents(1)).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        product_service.update_product_image(missing, vec![1, 2, 3]).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(product_service.delete_product(missing).await, Err(RepositoryError::NotFound)));
    assert!(matches!(
        variant_service.delete_variant(VariantId::generate()).await,
        Err(RepositoryError::NotFound)
    ));
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_image_bytes_round_trip(pool: PgPool) {
    let service = ProductService::new(pool.clone());
    let created = service
        .create_product("Mug", "Ceramic", Price::from_cents(1999))
        .await
        .unwrap();
    assert!(created.image.is_none());

    let bytes = vec![0xFF, 0xD8, 0xFF, 0x00, 0x10];
    service.update_product_image(created.id, bytes.clone()).await.unwrap();

    let stored = products::get_by_id(&pool, created.id).await.unwrap();
    assert_eq!(stored.image, Some(bytes));
    assert!(stored.updated_at.is_some());
}
