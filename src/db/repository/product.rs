//! Product Repository
//!
//! Listing runs as a single query so filtering, ordering and pagination all
//! happen inside the database. Price ordering sorts on a computed projection:
//! the discount price when one is set and greater than zero, the actual price
//! otherwise.

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Product, ProductCreate, ProductFilter, ProductReplace, ProductSort, ProductView};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let product = Product {
            id: None,
            images: data.images,
            title: data.title,
            description: data.description,
            actual_price: data.actual_price,
            discount_price: data.discount_price,
            is_out_of_stock: data.is_out_of_stock,
            is_featured: data.is_featured,
            category: data.category,
            brand: data.brand,
            created_at: Utc::now().timestamp_millis(),
        };

        let created: Option<Product> = self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Find product by id, raw record without resolved references
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let product: Option<Product> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(product)
    }

    /// Find product by id with category and brand resolved
    pub async fn find_view_by_id(&self, id: &str) -> RepoResult<Option<ProductView>> {
        let thing = make_thing(TABLE, id);
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM $thing FETCH category, brand")
            .bind(("thing", thing))
            .await?;
        let products: Vec<ProductView> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Filtered, sorted, paginated listing with references resolved.
    ///
    /// Returns the page of products plus the total match count before
    /// pagination.
    pub async fn list(&self, filter: ProductFilter) -> RepoResult<(Vec<ProductView>, i64)> {
        let page = filter.page.max(1);
        let limit = filter.limit.max(1);
        let start = (page - 1) * limit;

        let mut conditions: Vec<&str> = Vec::new();
        if filter.category.is_some() {
            conditions.push("category = $category");
        }
        if filter.brand.is_some() {
            conditions.push("brand = $brand");
        }
        if filter.search.is_some() {
            conditions.push(
                "(string::contains(string::lowercase(title), $search) OR string::contains(string::lowercase(description), $search))",
            );
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        // Price orderings sort on the computed effective price; time orderings
        // sort on creation time directly.
        let (projection, order_clause) = match filter.sort {
            ProductSort::LowToHigh => (
                "*, (IF discountPrice > 0 { discountPrice } ELSE { actualPrice }) AS effectivePrice",
                "ORDER BY effectivePrice ASC",
            ),
            ProductSort::HighToLow => (
                "*, (IF discountPrice > 0 { discountPrice } ELSE { actualPrice }) AS effectivePrice",
                "ORDER BY effectivePrice DESC",
            ),
            ProductSort::Oldest => ("*", "ORDER BY createdAt ASC"),
            ProductSort::Newest | ProductSort::Default => ("*", "ORDER BY createdAt DESC"),
        };

        // LIMIT/START are formatted inline: bound parameters in those
        // positions are unreliable (see tests/product_listing.rs).
        let page_sql = format!(
            "SELECT {projection} FROM product{where_clause} {order_clause} LIMIT {limit} START {start} FETCH category, brand"
        );
        let count_sql = format!("SELECT count() FROM product{where_clause} GROUP ALL");

        let search = filter.search.map(|s| s.trim().to_lowercase());

        let mut page_query = self.base.db().query(page_sql);
        let mut count_query = self.base.db().query(count_sql);
        if let Some(category) = filter.category {
            page_query = page_query.bind(("category", category.clone()));
            count_query = count_query.bind(("category", category));
        }
        if let Some(brand) = filter.brand {
            page_query = page_query.bind(("brand", brand.clone()));
            count_query = count_query.bind(("brand", brand));
        }
        if let Some(search) = search {
            page_query = page_query.bind(("search", search.clone()));
            count_query = count_query.bind(("search", search));
        }

        let products: Vec<ProductView> = page_query.await?.take(0)?;
        let total: Option<i64> = count_query.await?.take((0, "count"))?;

        Ok((products, total.unwrap_or(0)))
    }

    /// Replace a product's fields wholesale (see [`ProductReplace`])
    pub async fn update(&self, id: &str, data: ProductReplace) -> RepoResult<ProductView> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Product not found".to_string()))?;

        let pure_id = strip_table_prefix(TABLE, id);
        let thing = make_thing(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", data))
            .await?;

        self.find_view_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Product not found".to_string()))
    }

    /// Hard delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Product not found".to_string()))?;

        let thing = make_thing(TABLE, strip_table_prefix(TABLE, id));
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;

        Ok(())
    }
}
