use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::repository::UserRepository;
use crate::services::{ImageStore, admin_seed};
use crate::utils::AppResult;

/// Server state - shared handles to every service
///
/// Cheap to clone: the database handle and JWT service are shared
/// references.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Immutable configuration |
/// | db | Surreal<Db> | Embedded database |
/// | jwt_service | Arc<JwtService> | Token issuing and validation |
/// | image_store | ImageStore | Uploaded image storage |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub image_store: ImageStore,
}

impl ServerState {
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt_service: Arc<JwtService>,
        image_store: ImageStore,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            image_store,
        }
    }

    /// Initialize the server state
    ///
    /// 1. Ensure the work directory layout exists
    /// 2. Open the embedded database at `work_dir/database/catalog.db`
    /// 3. Build the JWT service and image store
    /// 4. Seed the admin account from the environment (non-fatal)
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| crate::utils::AppError::internal(format!(
                "Failed to create work directory structure: {e}"
            )))?;

        let db_path = config.database_dir().join("catalog.db");
        let db = crate::db::connect(&db_path.to_string_lossy()).await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let image_store = ImageStore::new(config.uploads_dir());

        let state = Self::new(config.clone(), db, jwt_service, image_store);

        // Seeding problems are logged, never fatal: the server must still
        // come up so the operator can fix the environment and restart.
        if let Err(e) = admin_seed::seed_admin(&UserRepository::new(state.get_db())).await {
            tracing::warn!(error = %e, "admin seeding failed");
        }

        Ok(state)
    }

    /// Shared database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// JWT service handle
    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Image store handle
    pub fn image_store(&self) -> &ImageStore {
        &self.image_store
    }
}
