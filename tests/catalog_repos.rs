//! Repository integration tests on the in-memory engine
//! Run: cargo test --test catalog_repos

use catalog_server::db::models::{
    BannerCreate, BannerUpdate, BrandCreate, CategoryCreate, CategoryUpdate, User,
};
use catalog_server::db::repository::{
    BannerRepository, BrandRepository, CategoryRepository, RepoError, UserRepository,
};
use catalog_server::services::admin_seed::seed_admin_with;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

async fn test_db() -> Surreal<Db> {
    let db: Surreal<Db> = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    db
}

// Creation timestamps have millisecond precision; space out writes whose
// relative order matters.
async fn tick() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}

#[tokio::test]
async fn category_crud_and_ordering() {
    let repo = CategoryRepository::new(test_db().await);

    let first = repo
        .create(CategoryCreate {
            name: "tools".to_string(),
            image: "/uploads/categories/a.jpg".to_string(),
        })
        .await
        .unwrap();
    tick().await;
    repo.create(CategoryCreate {
        name: "toys".to_string(),
        image: "/uploads/categories/b.jpg".to_string(),
    })
    .await
    .unwrap();

    // Oldest first
    let all = repo.find_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "tools");
    assert_eq!(all[1].name, "toys");

    let id = first.id.as_ref().unwrap().to_raw();
    let fetched = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "tools");

    // Update image only, name untouched
    let updated = repo
        .update(
            &id,
            CategoryUpdate {
                name: None,
                image: Some("/uploads/categories/c.jpg".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "tools");
    assert_eq!(updated.image, "/uploads/categories/c.jpg");

    repo.delete(&id).await.unwrap();
    assert!(repo.find_by_id(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn category_duplicate_name_is_case_insensitive() {
    let repo = CategoryRepository::new(test_db().await);

    repo.create(CategoryCreate {
        name: "tools".to_string(),
        image: String::new(),
    })
    .await
    .unwrap();

    // The repository compares lowercased, so any casing collides
    let err = repo
        .create(CategoryCreate {
            name: "TOOLS".to_string(),
            image: String::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn category_update_keeps_own_name() {
    let repo = CategoryRepository::new(test_db().await);

    let created = repo
        .create(CategoryCreate {
            name: "tools".to_string(),
            image: String::new(),
        })
        .await
        .unwrap();
    tick().await;
    repo.create(CategoryCreate {
        name: "toys".to_string(),
        image: String::new(),
    })
    .await
    .unwrap();

    let id = created.id.as_ref().unwrap().to_raw();

    // Re-submitting the unchanged name is not a duplicate
    let updated = repo
        .update(
            &id,
            CategoryUpdate {
                name: Some("tools".to_string()),
                image: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "tools");

    // Renaming onto another record's name is
    let err = repo
        .update(
            &id,
            CategoryUpdate {
                name: Some("toys".to_string()),
                image: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn missing_records_are_not_found() {
    let db = test_db().await;
    let categories = CategoryRepository::new(db.clone());
    let banners = BannerRepository::new(db);

    assert!(categories.find_by_id("nope").await.unwrap().is_none());
    assert!(matches!(
        categories.delete("nope").await.unwrap_err(),
        RepoError::NotFound(_)
    ));
    assert!(matches!(
        banners
            .update(
                "nope",
                BannerUpdate {
                    sub_title: None,
                    main_title: None,
                    link: None,
                    image: None,
                },
            )
            .await
            .unwrap_err(),
        RepoError::NotFound(_)
    ));
}

#[tokio::test]
async fn brand_listing_is_newest_first() {
    let repo = BrandRepository::new(test_db().await);

    repo.create(BrandCreate {
        name: "acme".to_string(),
        image: String::new(),
    })
    .await
    .unwrap();
    tick().await;
    repo.create(BrandCreate {
        name: "globex".to_string(),
        image: String::new(),
    })
    .await
    .unwrap();

    let all = repo.find_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "globex");
    assert_eq!(all[1].name, "acme");
}

#[tokio::test]
async fn banner_update_merges_only_provided_fields() {
    let repo = BannerRepository::new(test_db().await);

    let created = repo
        .create(BannerCreate {
            image: String::new(),
            sub_title: Some("Summer".to_string()),
            main_title: Some("Sale".to_string()),
            link: None,
        })
        .await
        .unwrap();
    assert_eq!(created.image, "");

    let id = created.id.as_ref().unwrap().to_raw();
    let updated = repo
        .update(
            &id,
            BannerUpdate {
                sub_title: None,
                main_title: None,
                link: Some("https://shop.example/sale".to_string()),
                image: Some("/uploads/banners/x.jpg".to_string()),
            },
        )
        .await
        .unwrap();

    // Untouched fields survive the merge
    assert_eq!(updated.sub_title.as_deref(), Some("Summer"));
    assert_eq!(updated.main_title.as_deref(), Some("Sale"));
    assert_eq!(updated.link.as_deref(), Some("https://shop.example/sale"));
    assert_eq!(updated.image, "/uploads/banners/x.jpg");
}

#[tokio::test]
async fn user_create_and_login_lookup() {
    let repo = UserRepository::new(test_db().await);

    assert_eq!(repo.count().await.unwrap(), 0);

    let hash = User::hash_password("S3cret!pass").unwrap();
    let created = repo.create("admin", &hash).await.unwrap();
    assert_eq!(created.username, "admin");
    assert_eq!(repo.count().await.unwrap(), 1);

    let found = repo.find_by_username("admin").await.unwrap().unwrap();
    assert!(found.verify_password("S3cret!pass").unwrap());
    assert!(!found.verify_password("wrong").unwrap());

    assert!(repo.find_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn admin_seed_is_idempotent() {
    let repo = UserRepository::new(test_db().await);

    seed_admin_with(&repo, "admin", "S3cret!pass").await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 1);

    // Second run finds the account and leaves it alone, even with a
    // different password
    seed_admin_with(&repo, "admin", "Rotated!pass").await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 1);

    let user = repo.find_by_username("admin").await.unwrap().unwrap();
    assert!(user.verify_password("S3cret!pass").unwrap());
    assert!(!user.verify_password("Rotated!pass").unwrap());
}
