//! Brand Repository

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Brand, BrandCreate, BrandUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "brand";

#[derive(Clone)]
pub struct BrandRepository {
    base: BaseRepository,
}

impl BrandRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all brands, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Brand>> {
        let brands: Vec<Brand> = self
            .base
            .db()
            .query("SELECT * FROM brand ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(brands)
    }

    /// Find brand by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Brand>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let brand: Option<Brand> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(brand)
    }

    /// Find a brand by name, case-insensitively, optionally skipping one record
    pub async fn find_by_name(
        &self,
        name: &str,
        exclude_id: Option<&str>,
    ) -> RepoResult<Option<Brand>> {
        let needle = name.trim().to_lowercase();
        let mut result = match exclude_id {
            Some(id) => {
                let thing = make_thing(TABLE, id);
                self.base
                    .db()
                    .query("SELECT * FROM brand WHERE string::lowercase(name) = $name AND id != $exclude LIMIT 1")
                    .bind(("name", needle))
                    .bind(("exclude", thing))
                    .await?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM brand WHERE string::lowercase(name) = $name LIMIT 1")
                    .bind(("name", needle))
                    .await?
            }
        };
        let brands: Vec<Brand> = result.take(0)?;
        Ok(brands.into_iter().next())
    }

    /// Create a new brand. Name must already be trimmed and lowercased.
    pub async fn create(&self, data: BrandCreate) -> RepoResult<Brand> {
        if self.find_by_name(&data.name, None).await?.is_some() {
            return Err(RepoError::Duplicate("Brand name already exists".to_string()));
        }

        let brand = Brand {
            id: None,
            name: data.name,
            image: data.image,
            created_at: Utc::now().timestamp_millis(),
        };

        let created: Option<Brand> = self.base.db().create(TABLE).content(brand).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create brand".to_string()))
    }

    /// Update a brand. A provided name must already be normalized.
    pub async fn update(&self, id: &str, data: BrandUpdate) -> RepoResult<Brand> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Brand not found".to_string()))?;

        if let Some(ref new_name) = data.name
            && self.find_by_name(new_name, Some(id)).await?.is_some()
        {
            return Err(RepoError::Duplicate("Brand name already exists".to_string()));
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
            .ok_or_else(|| RepoError::NotFound("Brand not found".to_string()))
    }

    /// Hard delete a brand. Products keep their now-dangling reference.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Brand not found".to_string()))?;

        let thing = make_thing(TABLE, strip_table_prefix(TABLE, id));
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;

        Ok(())
    }
}
