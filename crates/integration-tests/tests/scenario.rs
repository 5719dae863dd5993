//! End-to-end catalog flow through the services.
//!
//! Run with: `cargo test -p catalog-integration-tests --test scenario -- --ignored`

#![allow(clippy::unwrap_used)]

use catalog_api::db::RepositoryError;
use catalog_api::services::{AttributeService, CategoryService, ProductService, VariantService};
use catalog_core::{PageRequest, Price};
use catalog_integration_tests::{active_link_count, first_page};
use sqlx::PgPool;

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_product_lifecycle_with_categories(pool: PgPool) {
    let products = ProductService::new(pool.clone());
    let categories = CategoryService::new(pool.clone());

    let mug = products
        .create_product("Mug", "Ceramic mug", Price::from_cents(1999))
        .await
        .unwrap();

    let listing = products
        .list_products(&PageRequest::new(10, "").unwrap())
        .await
        .unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing.items[0].name, "Mug");
    assert_eq!(listing.items[0].price, Price::from_cents(1999));
    assert!(listing.next_cursor.is_empty());

    let kitchen = categories.create_category("Kitchen", "").await.unwrap();
    let gifts = categories.create_category("Gifts", "").await.unwrap();

    products
        .add_categories(mug.id, &[kitchen.id, gifts.id])
        .await
        .unwrap();
    products.remove_categories(mug.id, &[kitchen.id]).await.unwrap();

    let detail = products.get_product_detail(mug.id).await.unwrap();
    assert_eq!(detail.product.id, mug.id);
    let linked: Vec<_> = detail.categories.iter().map(|c| c.id).collect();
    assert_eq!(linked, vec![gifts.id]);

    products.delete_product(mug.id).await.unwrap();

    assert!(matches!(
        products.get_product_detail(mug.id).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(products.list_products(&first_page(10)).await.unwrap().is_empty());
    assert_eq!(active_link_count(&pool, mug.id, gifts.id).await.unwrap(), 0);
    // Categories outlive the product.
    assert_eq!(categories.get_category(gifts.id).await.unwrap().name, "Gifts");
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_product_update_rewrites_fields(pool: PgPool) {
    let products = ProductService::new(pool.clone());
    let mug = products
        .create_product("Mug", "Ceramic", Price::from_cents(1999))
        .await
        .unwrap();

    let updated = products
        .update_product(mug.id, "Big Mug", "Stoneware", Price::from_cents(2499))
        .await
        .unwrap();
    assert_eq!(updated.name, "Big Mug");

    let detail = products.get_product_detail(mug.id).await.unwrap();
    assert_eq!(detail.product.name, "Big Mug");
    assert_eq!(detail.product.description, "Stoneware");
    assert_eq!(detail.product.price, Price::from_cents(2499));
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_variants_follow_their_main_product(pool: PgPool) {
    let products = ProductService::new(pool.clone());
    let variants = VariantService::new(pool.clone());

    let mug = products
        .create_product("Mug", "", Price::from_cents(1999))
        .await
        .unwrap();
    products.update_product_image(mug.id, vec![0xFF, 0xD8, 0xFF]).await.unwrap();

    let large = variants
        .create_variant("Large", "500ml", Price::from_cents(2499), mug.id)
        .await
        .unwrap();
    assert_eq!(large.main_id, mug.id);
    assert_eq!(large.main_name, "Mug");
    assert_eq!(large.image, Some(vec![0xFF, 0xD8, 0xFF]));

    let fetched = variants.get_variant(large.id).await.unwrap();
    assert_eq!(fetched, large);

    // Moving the variant to another product.
    let jug = products
        .create_product("Jug", "", Price::from_cents(2999))
        .await
        .unwrap();
    let moved = variants
        .update_variant(large.id, "Large", "1l", Price::from_cents(3499), jug.id)
        .await
        .unwrap();
    assert_eq!(moved.main_name, "Jug");
    assert!(moved.image.is_none());

    // A variant is hidden once its main product is gone.
    products.delete_product(jug.id).await.unwrap();
    assert!(matches!(
        variants.get_variant(large.id).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(variants.list_variants(&first_page(10)).await.unwrap().is_empty());

    // And cannot be moved onto a deleted product.
    let small = variants
        .create_variant("Small", "", Price::from_cents(1499), mug.id)
        .await
        .unwrap();
    assert!(matches!(
        variants
            .update_variant(small.id, "Small", "", Price::from_cents(1499), jug.id)
            .await,
        Err(RepositoryError::NotFound)
    ));
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_attribute_names_are_lowercased(pool: PgPool) {
    let attributes = AttributeService::new(pool.clone());

    let colour = attributes.create_attribute("Colour").await.unwrap();
    assert_eq!(colour.name, "colour");

    let renamed = attributes.rename_attribute(colour.id, "SIZE").await.unwrap();
    assert_eq!(renamed.name, "size");
    assert_eq!(attributes.get_attribute(colour.id).await.unwrap().name, "size");

    attributes.delete_attribute(colour.id).await.unwrap();
    assert!(matches!(
        attributes.delete_attribute(colour.id).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(attributes.list_attributes(&first_page(5)).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_category_update_shows_in_product_detail(pool: PgPool) {
    let products = ProductService::new(pool.clone());
    let categories = CategoryService::new(pool.clone());

    let mug = products
        .create_product("Mug", "", Price::from_cents(1999))
        .await
        .unwrap();
    let kitchen = categories.create_category("Kitchen", "").await.unwrap();
    products.add_categories(mug.id, &[kitchen.id]).await.unwrap();

    categories
        .update_category(kitchen.id, "Kitchenware", "Pots and pans")
        .await
        .unwrap();

    let detail = products.get_product_detail(mug.id).await.unwrap();
    assert_eq!(detail.categories[0].name, "Kitchenware");
    assert_eq!(detail.categories[0].description, "Pots and pans");

    let links = products.list_category_links(&first_page(10)).await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links.items[0].category_name, "Kitchenware");
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_non_ascii_attribute_names_store_as_lowercased(pool: PgPool) {
    let attributes = AttributeService::new(pool.clone());

    for (input, expected) in [("GRÖSSE", "grösse"), ("ǅemper", "ǆemper"), ("İznik", "i\u{307}znik")] {
        let created = attributes.create_attribute(input).await.unwrap();
        assert_eq!(created.name, expected);
        assert_eq!(attributes.get_attribute(created.id).await.unwrap().name, expected);
    }
}
