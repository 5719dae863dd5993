//! Product/category link reconciliation.
//!
//! Run with: `cargo test -p catalog-integration-tests --test reconciler -- --ignored`

#![allow(clippy::unwrap_used)]

use catalog_api::db::{RepositoryError, categories, product_categories, products};
use catalog_api::models::{Category, Product, ProductCategory};
use catalog_api::services::{CategoryService, ProductService};
use catalog_core::CategoryId;
use catalog_integration_tests::{active_link_count, category_at, first_page, product_at, row_count};
use sqlx::PgPool;

async fn seed(pool: &PgPool) -> (Product, Category, Category) {
    let product = product_at("Mug", 0);
    let kitchen = category_at("Kitchen", 1);
    let gifts = category_at("Gifts", 2);
    products::save(pool, &product).await.unwrap();
    categories::save(pool, &kitchen).await.unwrap();
    categories::save(pool, &gifts).await.unwrap();
    (product, kitchen, gifts)
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_adding_twice_keeps_one_link(pool: PgPool) {
    let (product, kitchen, _) = seed(&pool).await;
    let service = ProductService::new(pool.clone());

    let first = service.add_categories(product.id, &[kitchen.id]).await.unwrap();
    assert_eq!(first.linked, vec![kitchen.id]);

    let second = service.add_categories(product.id, &[kitchen.id]).await.unwrap();
    assert!(second.linked.is_empty());
    assert_eq!(second.already_linked, vec![kitchen.id]);

    assert_eq!(active_link_count(&pool, product.id, kitchen.id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_ids_in_one_request_link_once(pool: PgPool) {
    let (product, kitchen, _) = seed(&pool).await;
    let service = ProductService::new(pool.clone());

    let outcome = service
        .add_categories(product.id, &[kitchen.id, kitchen.id, kitchen.id])
        .await
        .unwrap();

    assert_eq!(outcome.linked, vec![kitchen.id]);
    assert_eq!(active_link_count(&pool, product.id, kitchen.id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_removing_unlinked_category_aborts_whole_batch(pool: PgPool) {
    let (product, kitchen, gifts) = seed(&pool).await;
    let service = ProductService::new(pool.clone());

    let err = service
        .reconcile_categories(product.id, &[kitchen.id], &[gifts.id])
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound));
    // The addition in the same batch was rolled back.
    assert_eq!(active_link_count(&pool, product.id, kitchen.id).await.unwrap(), 0);
    assert_eq!(row_count(&pool, "product_category").await.unwrap(), 0);
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_category_in_both_sets_ends_unlinked(pool: PgPool) {
    let (product, kitchen, gifts) = seed(&pool).await;
    let service = ProductService::new(pool.clone());

    let outcome = service
        .reconcile_categories(product.id, &[kitchen.id, gifts.id], &[kitchen.id])
        .await
        .unwrap();

    assert_eq!(outcome.linked, vec![kitchen.id, gifts.id]);
    assert_eq!(outcome.unlinked, vec![kitchen.id]);
    assert_eq!(active_link_count(&pool, product.id, kitchen.id).await.unwrap(), 0);
    assert_eq!(active_link_count(&pool, product.id, gifts.id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_unknown_or_deleted_category_cannot_be_added(pool: PgPool) {
    let (product, kitchen, _) = seed(&pool).await;
    let service = ProductService::new(pool.clone());

    let err = service
        .add_categories(product.id, &[CategoryId::generate()])
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));

    CategoryService::new(pool.clone())
        .delete_category(kitchen.id)
        .await
        .unwrap();
    let err = service.add_categories(product.id, &[kitchen.id]).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));

    assert_eq!(row_count(&pool, "product_category").await.unwrap(), 0);
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_deleted_product_cannot_be_reconciled(pool: PgPool) {
    let (product, kitchen, _) = seed(&pool).await;
    let service = ProductService::new(pool.clone());
    service.delete_product(product.id).await.unwrap();

    let err = service.add_categories(product.id, &[kitchen.id]).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_relink_after_remove_creates_new_row(pool: PgPool) {
    let (product, kitchen, _) = seed(&pool).await;
    let service = ProductService::new(pool.clone());

    service.add_categories(product.id, &[kitchen.id]).await.unwrap();
    service.remove_categories(product.id, &[kitchen.id]).await.unwrap();
    service.add_categories(product.id, &[kitchen.id]).await.unwrap();

    assert_eq!(active_link_count(&pool, product.id, kitchen.id).await.unwrap(), 1);
    // The removed link stays behind as history.
    assert_eq!(row_count(&pool, "product_category").await.unwrap(), 2);
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_deleting_category_retires_its_links(pool: PgPool) {
    let (product, kitchen, gifts) = seed(&pool).await;
    let service = ProductService::new(pool.clone());
    service
        .add_categories(product.id, &[kitchen.id, gifts.id])
        .await
        .unwrap();

    CategoryService::new(pool.clone())
        .delete_category(gifts.id)
        .await
        .unwrap();

    assert_eq!(active_link_count(&pool, product.id, gifts.id).await.unwrap(), 0);
    let detail = service.get_product_detail(product.id).await.unwrap();
    let names: Vec<_> = detail.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Kitchen"]);
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_deleting_product_retires_its_links(pool: PgPool) {
    let (product, kitchen, gifts) = seed(&pool).await;
    let service = ProductService::new(pool.clone());
    service
        .add_categories(product.id, &[kitchen.id, gifts.id])
        .await
        .unwrap();

    service.delete_product(product.id).await.unwrap();

    assert_eq!(active_link_count(&pool, product.id, kitchen.id).await.unwrap(), 0);
    assert_eq!(active_link_count(&pool, product.id, gifts.id).await.unwrap(), 0);
    let page = service.list_category_links(&first_page(10)).await.unwrap();
    assert!(page.is_empty());
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_link_can_be_repointed(pool: PgPool) {
    let (product, kitchen, gifts) = seed(&pool).await;
    let link = ProductCategory::new(product.id, kitchen.id);
    product_categories::save(&pool, &link).await.unwrap();

    let mut detail = product_categories::get_by_id(&pool, link.id).await.unwrap();
    assert_eq!(detail.category_name, "Kitchen");
    detail.link.repoint(product.id, gifts.id);
    assert_eq!(product_categories::edit(&pool, &detail.link).await.unwrap(), 1);

    let moved = product_categories::get_by_id(&pool, link.id).await.unwrap();
    assert_eq!(moved.link.category_id, gifts.id);
    assert_eq!(moved.category_name, "Gifts");
    assert!(moved.link.updated_at.is_some());
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_second_active_link_for_pair_conflicts(pool: PgPool) {
    let (product, kitchen, _) = seed(&pool).await;
    product_categories::save(&pool, &ProductCategory::new(product.id, kitchen.id))
        .await
        .unwrap();

    let err = product_categories::save(&pool, &ProductCategory::new(product.id, kitchen.id))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)), "{err:?}");
}
