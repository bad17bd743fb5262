//! Product listing semantics on the in-memory engine: filters, effective
//! price ordering, pagination and reference resolution.
//! Run: cargo test --test product_listing

use catalog_server::db::models::{
    BrandCreate, CategoryCreate, ProductCreate, ProductFilter, ProductReplace, ProductSort,
};
use catalog_server::db::repository::{
    BrandRepository, CategoryRepository, ProductRepository, RepoError, make_thing,
};
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use surrealdb::sql::Thing;

async fn test_db() -> Surreal<Db> {
    let db: Surreal<Db> = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    db
}

struct Fixture {
    products: ProductRepository,
    categories: CategoryRepository,
    category: Thing,
    brand: Thing,
}

async fn fixture(db: Surreal<Db>) -> Fixture {
    let categories = CategoryRepository::new(db.clone());
    let brands = BrandRepository::new(db.clone());

    let category = categories
        .create(CategoryCreate {
            name: "shoes".to_string(),
            image: String::new(),
        })
        .await
        .unwrap()
        .id
        .unwrap();
    let brand = brands
        .create(BrandCreate {
            name: "acme".to_string(),
            image: String::new(),
        })
        .await
        .unwrap()
        .id
        .unwrap();

    Fixture {
        products: ProductRepository::new(db),
        categories,
        category,
        brand,
    }
}

fn product(
    title: &str,
    actual: f64,
    discount: Option<f64>,
    category: &Thing,
    brand: &Thing,
) -> ProductCreate {
    ProductCreate {
        images: vec!["/uploads/products/x.jpg".to_string()],
        title: title.to_string(),
        description: format!("{title} description"),
        actual_price: actual,
        discount_price: discount,
        is_out_of_stock: false,
        is_featured: false,
        category: category.clone(),
        brand: brand.clone(),
    }
}

fn default_filter() -> ProductFilter {
    ProductFilter {
        page: 1,
        limit: 10,
        ..ProductFilter::default()
    }
}

#[tokio::test]
async fn effective_price_ordering() {
    let f = fixture(test_db().await).await;

    // Effective price: discount when set and > 0, actual otherwise.
    // discounted: 50, zero_discount: 40, plain: 45
    f.products
        .create(product("discounted", 100.0, Some(50.0), &f.category, &f.brand))
        .await
        .unwrap();
    f.products
        .create(product("zero_discount", 40.0, Some(0.0), &f.category, &f.brand))
        .await
        .unwrap();
    f.products
        .create(product("plain", 45.0, None, &f.category, &f.brand))
        .await
        .unwrap();

    let (asc, total) = f
        .products
        .list(ProductFilter {
            sort: ProductSort::LowToHigh,
            ..default_filter()
        })
        .await
        .unwrap();
    assert_eq!(total, 3);
    let titles: Vec<&str> = asc.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["zero_discount", "plain", "discounted"]);

    let (desc, _) = f
        .products
        .list(ProductFilter {
            sort: ProductSort::HighToLow,
            ..default_filter()
        })
        .await
        .unwrap();
    let titles: Vec<&str> = desc.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["discounted", "plain", "zero_discount"]);
}

#[tokio::test]
async fn recency_ordering() {
    let f = fixture(test_db().await).await;

    f.products
        .create(product("older", 10.0, None, &f.category, &f.brand))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    f.products
        .create(product("newer", 20.0, None, &f.category, &f.brand))
        .await
        .unwrap();

    let (newest, _) = f
        .products
        .list(ProductFilter {
            sort: ProductSort::Newest,
            ..default_filter()
        })
        .await
        .unwrap();
    assert_eq!(newest[0].title, "newer");

    let (oldest, _) = f
        .products
        .list(ProductFilter {
            sort: ProductSort::Oldest,
            ..default_filter()
        })
        .await
        .unwrap();
    assert_eq!(oldest[0].title, "older");
}

#[tokio::test]
async fn search_is_case_insensitive_over_title_and_description() {
    let f = fixture(test_db().await).await;

    f.products
        .create(product("Trail Runner", 80.0, None, &f.category, &f.brand))
        .await
        .unwrap();
    let mut other = product("City Boot", 90.0, None, &f.category, &f.brand);
    other.description = "Waterproof TRAIL companion".to_string();
    f.products.create(other).await.unwrap();
    f.products
        .create(product("Sandal", 30.0, None, &f.category, &f.brand))
        .await
        .unwrap();

    let (hits, total) = f
        .products
        .list(ProductFilter {
            search: Some("trail".to_string()),
            ..default_filter()
        })
        .await
        .unwrap();
    assert_eq!(total, 2);
    let mut titles: Vec<&str> = hits.iter().map(|p| p.title.as_str()).collect();
    titles.sort();
    assert_eq!(titles, ["City Boot", "Trail Runner"]);
}

#[tokio::test]
async fn category_filter_and_pagination() {
    let f = fixture(test_db().await).await;
    let other_category = f
        .categories
        .create(CategoryCreate {
            name: "hats".to_string(),
            image: String::new(),
        })
        .await
        .unwrap()
        .id
        .unwrap();

    for i in 0..15 {
        f.products
            .create(product(&format!("shoe {i}"), 10.0 + i as f64, None, &f.category, &f.brand))
            .await
            .unwrap();
    }
    f.products
        .create(product("cap", 5.0, None, &other_category, &f.brand))
        .await
        .unwrap();

    let (page2, total) = f
        .products
        .list(ProductFilter {
            category: Some(f.category.clone()),
            page: 2,
            limit: 10,
            ..ProductFilter::default()
        })
        .await
        .unwrap();
    // 15 matches in the filtered category, 5 left on the second page
    assert_eq!(total, 15);
    assert_eq!(page2.len(), 5);

    let (all, grand_total) = f
        .products
        .list(ProductFilter {
            page: 1,
            limit: 100,
            ..ProductFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(grand_total, 16);
    assert_eq!(all.len(), 16);
}

#[tokio::test]
async fn product_can_be_created_without_images() {
    let f = fixture(test_db().await).await;

    let mut imageless = product("imageless", 20.0, None, &f.category, &f.brand);
    imageless.images = Vec::new();
    let created = f.products.create(imageless).await.unwrap();

    let id = created.id.as_ref().unwrap().to_raw();
    let view = f.products.find_view_by_id(&id).await.unwrap().unwrap();
    assert_eq!(view.title, "imageless");
    assert!(view.images.is_empty());
}

#[tokio::test]
async fn page_size_is_not_capped() {
    let f = fixture(test_db().await).await;

    for i in 0..105 {
        f.products
            .create(product(&format!("item {i}"), 1.0 + i as f64, None, &f.category, &f.brand))
            .await
            .unwrap();
    }

    let (all, total) = f
        .products
        .list(ProductFilter {
            page: 1,
            limit: 500,
            ..ProductFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(total, 105);
    assert_eq!(all.len(), 105);
}

#[tokio::test]
async fn views_resolve_references_and_tolerate_dangling_ones() {
    let f = fixture(test_db().await).await;

    let created = f
        .products
        .create(product("boot", 60.0, None, &f.category, &f.brand))
        .await
        .unwrap();
    let id = created.id.as_ref().unwrap().to_raw();

    let view = f.products.find_view_by_id(&id).await.unwrap().unwrap();
    assert_eq!(view.category.as_ref().unwrap().name, "shoes");
    assert_eq!(view.brand.as_ref().unwrap().name, "acme");

    // Deleting the category leaves the product with a dangling reference
    // that reads back as null
    f.categories.delete(&f.category.to_raw()).await.unwrap();
    let view = f.products.find_view_by_id(&id).await.unwrap().unwrap();
    assert!(view.category.is_none());
    assert_eq!(view.brand.as_ref().unwrap().name, "acme");
}

#[tokio::test]
async fn update_replaces_wholesale_and_clears_discount() {
    let f = fixture(test_db().await).await;

    let created = f
        .products
        .create(product("boot", 60.0, Some(45.0), &f.category, &f.brand))
        .await
        .unwrap();
    let id = created.id.as_ref().unwrap().to_raw();

    let updated = f
        .products
        .update(
            &id,
            ProductReplace {
                images: vec!["/uploads/products/new.jpg".to_string()],
                title: "winter boot".to_string(),
                description: String::new(),
                actual_price: 70.0,
                discount_price: None,
                is_out_of_stock: true,
                is_featured: false,
                category: make_thing("category", &f.category.to_raw()),
                brand: f.brand.clone(),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "winter boot");
    assert_eq!(updated.description, "");
    assert_eq!(updated.actual_price, 70.0);
    assert_eq!(updated.discount_price, None);
    assert!(updated.is_out_of_stock);
    assert_eq!(updated.images, vec!["/uploads/products/new.jpg".to_string()]);
}

#[tokio::test]
async fn delete_missing_product_is_not_found() {
    let f = fixture(test_db().await).await;
    assert!(matches!(
        f.products.delete("missing").await.unwrap_err(),
        RepoError::NotFound(_)
    ));
}
