//! Category Repository

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all categories, oldest first
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category ORDER BY createdAt ASC")
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Find category by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let category: Option<Category> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(category)
    }

    /// Find a category by name, case-insensitively, optionally skipping one
    /// record (used to let an update keep its own name).
    pub async fn find_by_name(
        &self,
        name: &str,
        exclude_id: Option<&str>,
    ) -> RepoResult<Option<Category>> {
        let needle = name.trim().to_lowercase();
        let mut result = match exclude_id {
            Some(id) => {
                let thing = make_thing(TABLE, id);
                self.base
                    .db()
                    .query("SELECT * FROM category WHERE string::lowercase(name) = $name AND id != $exclude LIMIT 1")
                    .bind(("name", needle))
                    .bind(("exclude", thing))
                    .await?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM category WHERE string::lowercase(name) = $name LIMIT 1")
                    .bind(("name", needle))
                    .await?
            }
        };
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Create a new category. Name must already be trimmed and lowercased.
    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        if self.find_by_name(&data.name, None).await?.is_some() {
            return Err(RepoError::Duplicate(
                "Category name already exists".to_string(),
            ));
        }

        let category = Category {
            id: None,
            name: data.name,
            image: data.image,
            created_at: Utc::now().timestamp_millis(),
        };

        let created: Option<Category> = self.base.db().create(TABLE).content(category).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Update a category. A provided name must already be normalized.
    pub async fn update(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Category not found".to_string()))?;

        if let Some(ref new_name) = data.name
            && self.find_by_name(new_name, Some(id)).await?.is_some()
        {
            return Err(RepoError::Duplicate(
                "Category name already exists".to_string(),
            ));
        }

        let pure_id = strip_table_prefix(TABLE, id);
        let thing = make_thing(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", data))
            .await?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Category not found".to_string()))
    }

    /// Hard delete a category. Products keep their now-dangling reference.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Category not found".to_string()))?;

        let thing = make_thing(TABLE, strip_table_prefix(TABLE, id));
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;

        Ok(())
    }
}
