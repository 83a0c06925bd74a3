#![allow(clippy::unwrap_used)]

//! Integration tests for profile editing and the one-to-one address upsert.

use palengke_integration_tests::{count_rows, register_user, test_pool};
use palengke_server::db::UserRepository;
use palengke_server::models::{AddressUpdate, ProfileUpdate};

fn edit_with_address(city: &str) -> ProfileUpdate {
    ProfileUpdate {
        first_name: Some("Maria".to_owned()),
        last_name: Some("Santos".to_owned()),
        contact_num: Some("0917-000-0000".to_owned()),
        address: Some(AddressUpdate {
            street_address: "7 Mango Ave".to_owned(),
            city: city.to_owned(),
            province: "Cebu".to_owned(),
            zip_code: "6000".to_owned(),
        }),
        ..ProfileUpdate::default()
    }
}

#[tokio::test]
async fn first_edit_creates_the_address() {
    let pool = test_pool().await;
    let user = register_user(&pool, "maria_santos").await;
    let users = UserRepository::new(&pool);

    assert!(users.get_address(user.id).await.unwrap().is_none());

    let (updated, address) = users
        .update_profile(user.id, &edit_with_address("Cebu City"))
        .await
        .unwrap();

    assert_eq!(updated.first_name.as_deref(), Some("Maria"));
    let address = address.expect("first edit with address fields creates the row");
    assert_eq!(address.city, "Cebu City");
    assert_eq!(address.user_id, user.id);
}

#[tokio::test]
async fn second_edit_updates_in_place() {
    let pool = test_pool().await;
    let user = register_user(&pool, "maria_santos").await;
    let users = UserRepository::new(&pool);

    users
        .update_profile(user.id, &edit_with_address("Cebu City"))
        .await
        .unwrap();
    let (_, address) = users
        .update_profile(user.id, &edit_with_address("Mandaue"))
        .await
        .unwrap();

    // Exactly one row, carrying the second edit's values
    let rows = count_rows(&pool, "SELECT COUNT(*) FROM addresses").await;
    assert_eq!(rows, 1);
    assert_eq!(address.unwrap().city, "Mandaue");
}

#[tokio::test]
async fn edit_without_address_fields_leaves_no_row() {
    let pool = test_pool().await;
    let user = register_user(&pool, "maria_santos").await;
    let users = UserRepository::new(&pool);

    let (updated, address) = users
        .update_profile(
            user.id,
            &ProfileUpdate {
                bio: Some("Weaver from Iloilo.".to_owned()),
                ..ProfileUpdate::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.bio.as_deref(), Some("Weaver from Iloilo."));
    assert!(address.is_none());
    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM addresses").await, 0);
}

#[tokio::test]
async fn contact_num_keeps_default_until_provided() {
    let pool = test_pool().await;
    let user = register_user(&pool, "maria_santos").await;
    let users = UserRepository::new(&pool);

    assert_eq!(user.contact_num, "N/A");

    let (updated, _) = users
        .update_profile(
            user.id,
            &ProfileUpdate {
                bio: Some("no number yet".to_owned()),
                ..ProfileUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.contact_num, "N/A");

    let (updated, _) = users
        .update_profile(
            user.id,
            &ProfileUpdate {
                contact_num: Some("0917-111-2222".to_owned()),
                ..ProfileUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.contact_num, "0917-111-2222");
}

#[tokio::test]
async fn deleting_a_user_cascades_to_the_address() {
    let pool = test_pool().await;
    let user = register_user(&pool, "maria_santos").await;
    let users = UserRepository::new(&pool);

    users
        .update_profile(user.id, &edit_with_address("Cebu City"))
        .await
        .unwrap();
    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM addresses").await, 1);

    // No handler deletes users; exercise the schema's cascade directly
    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM addresses").await, 0);
}
