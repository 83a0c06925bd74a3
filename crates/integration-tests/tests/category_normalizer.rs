#![allow(clippy::unwrap_used)]

//! Integration tests for the category normalizer.
//!
//! Every input that canonicalizes to the same name must resolve to the same
//! category row; categories are append-only and never duplicated.

use palengke_core::CategoryName;
use palengke_integration_tests::{count_rows, test_pool};
use palengke_server::db::CategoryRepository;

#[tokio::test]
async fn equivalent_inputs_resolve_to_one_category() {
    let pool = test_pool().await;
    let categories = CategoryRepository::new(&pool);

    let variants = ["shoes ", "Shoes", " SHOES", "shoes"];

    let first = categories
        .get_or_create(&CategoryName::canonicalize(variants[0]).unwrap())
        .await
        .unwrap();

    for variant in variants {
        let name = CategoryName::canonicalize(variant).unwrap();
        let resolved = categories.get_or_create(&name).await.unwrap();
        assert_eq!(resolved.id, first.id, "input {variant:?} created a new row");
    }

    let total = count_rows(&pool, "SELECT COUNT(*) FROM categories").await;
    assert_eq!(total, 1);
}

#[tokio::test]
async fn distinct_names_get_distinct_rows() {
    let pool = test_pool().await;
    let categories = CategoryRepository::new(&pool);

    let ceramics = categories
        .get_or_create(&CategoryName::canonicalize("ceramics").unwrap())
        .await
        .unwrap();
    let weaving = categories
        .get_or_create(&CategoryName::canonicalize("weaving").unwrap())
        .await
        .unwrap();

    assert_ne!(ceramics.id, weaving.id);
    assert_eq!(ceramics.name.as_str(), "Ceramics");
    assert_eq!(weaving.name.as_str(), "Weaving");
}

#[tokio::test]
async fn stored_name_is_canonical() {
    let pool = test_pool().await;
    let categories = CategoryRepository::new(&pool);

    let created = categories
        .get_or_create(&CategoryName::canonicalize("  home decor ").unwrap())
        .await
        .unwrap();

    assert_eq!(created.name.as_str(), "Home Decor");

    let fetched = categories
        .get_by_name(&CategoryName::canonicalize("HOME DECOR").unwrap())
        .await
        .unwrap()
        .expect("canonical lookup should hit");
    assert_eq!(fetched.id, created.id);
}
