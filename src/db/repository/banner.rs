//! Banner Repository

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Banner, BannerCreate, BannerUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "banner";

#[derive(Clone)]
pub struct BannerRepository {
    base: BaseRepository,
}

impl BannerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all banners, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Banner>> {
        let banners: Vec<Banner> = self
            .base
            .db()
            .query("SELECT * FROM banner ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(banners)
    }

    /// Find banner by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Banner>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let banner: Option<Banner> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(banner)
    }

    /// Create a new banner
    pub async fn create(&self, data: BannerCreate) -> RepoResult<Banner> {
        let banner = Banner {
            id: None,
            image: data.image,
            sub_title: data.sub_title,
            main_title: data.main_title,
            link: data.link,
            created_at: Utc::now().timestamp_millis(),
        };

        let created: Option<Banner> = self.base.db().create(TABLE).content(banner).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create banner".to_string()))
    }

    /// Update a banner, merging only the provided fields
    pub async fn update(&self, id: &str, data: BannerUpdate) -> RepoResult<Banner> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Banner not found".to_string()))?;

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
            .ok_or_else(|| RepoError::NotFound("Banner not found".to_string()))
    }

    /// Hard delete a banner
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Banner not found".to_string()))?;

        let thing = make_thing(TABLE, strip_table_prefix(TABLE, id));
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;

        Ok(())
    }
}
