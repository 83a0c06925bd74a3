#![allow(clippy::unwrap_used)]

//! Integration tests for the shop branch hierarchy.
//!
//! Sub-location listing is one level deep, and re-parenting walks the
//! ancestor chain so the hierarchy stays a tree.

use palengke_core::ShopId;
use palengke_integration_tests::{create_shop, register_user, test_pool};
use palengke_server::models::NewShop;
use palengke_server::services::shop::{ShopError, ShopService};

#[tokio::test]
async fn branches_list_one_level_only() {
    let pool = test_pool().await;
    let user = register_user(&pool, "branching_out").await;
    let main = create_shop(&pool, &user, "Main Shop").await;

    let service = ShopService::new(&pool);
    let branch = service
        .create_branch(
            user.id,
            NewShop {
                name: "Market Stall".to_owned(),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(branch.parent_shop_id, Some(main.id));

    // Grandchild: hang a second shop off the branch directly
    let second = service
        .create_branch(
            user.id,
            NewShop {
                name: "Festival Booth".to_owned(),
                description: None,
            },
        )
        .await
        .unwrap();
    service
        .attach_branch(user.id, second.id, branch.id)
        .await
        .unwrap();

    let children = service.sub_locations(main.id).await.unwrap();
    assert_eq!(children.len(), 1, "grandchildren must not appear");
    assert_eq!(children[0].id, branch.id);

    let grandchildren = service.sub_locations(branch.id).await.unwrap();
    assert_eq!(grandchildren.len(), 1);
    assert_eq!(grandchildren[0].id, second.id);
}

#[tokio::test]
async fn a_shop_cannot_become_its_own_parent() {
    let pool = test_pool().await;
    let user = register_user(&pool, "loop_maker").await;
    let main = create_shop(&pool, &user, "Main Shop").await;

    let result = ShopService::new(&pool)
        .attach_branch(user.id, main.id, main.id)
        .await;
    assert!(matches!(result, Err(ShopError::BranchCycle)));
}

#[tokio::test]
async fn a_shop_cannot_become_a_branch_of_its_descendant() {
    let pool = test_pool().await;
    let user = register_user(&pool, "loop_maker").await;
    let main = create_shop(&pool, &user, "Main Shop").await;

    let service = ShopService::new(&pool);
    let branch = service
        .create_branch(
            user.id,
            NewShop {
                name: "Market Stall".to_owned(),
                description: None,
            },
        )
        .await
        .unwrap();

    // main -> branch exists; attaching main under branch would loop
    let result = service.attach_branch(user.id, main.id, branch.id).await;
    assert!(matches!(result, Err(ShopError::BranchCycle)));
}

#[tokio::test]
async fn attaching_someone_elses_shop_is_forbidden() {
    let pool = test_pool().await;
    let owner = register_user(&pool, "rightful_owner").await;
    let intruder = register_user(&pool, "shop_snatcher").await;
    let owned = create_shop(&pool, &owner, "Owned Shop").await;
    let other = create_shop(&pool, &intruder, "Intruder Shop").await;

    let result = ShopService::new(&pool)
        .attach_branch(intruder.id, owned.id, other.id)
        .await;
    assert!(matches!(result, Err(ShopError::NotOwner)));
}

#[tokio::test]
async fn unknown_shop_branches_are_not_found() {
    let pool = test_pool().await;

    let result = ShopService::new(&pool)
        .sub_locations(ShopId::new(424_242))
        .await;
    assert!(matches!(result, Err(ShopError::NotFound)));
}
