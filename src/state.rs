use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusHandle;
use onlearn_auth::{IdentityProvider, SupabaseIdentityProvider};
use onlearn_config::{CorsConfig, StorageBackend, StorageConfig, SupabaseConfig};
use onlearn_core::{FileStorage, LocalFileStorage, SupabaseStorage};
use onlearn_db::{DatabaseConfig, init_db_pool, run_migrations};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub identity: Arc<dyn IdentityProvider>,
    pub storage: Arc<dyn FileStorage>,
    pub storage_config: StorageConfig,
    pub cors_config: CorsConfig,
    pub started_at: Instant,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        db: PgPool,
        identity: Arc<dyn IdentityProvider>,
        storage_config: StorageConfig,
        storage: Arc<dyn FileStorage>,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            db,
            identity,
            storage,
            storage_config,
            cors_config,
            started_at: Instant::now(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }

    /// Seconds since the state was built, which is process start in practice.
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

pub fn init_storage(
    config: &StorageConfig,
    supabase: &SupabaseConfig,
) -> anyhow::Result<Arc<dyn FileStorage>> {
    let storage: Arc<dyn FileStorage> = match config.backend {
        StorageBackend::Local => Arc::new(LocalFileStorage::with_max_size(
            config.local_dir.clone(),
            config.public_base_url.clone(),
            config.max_upload_bytes,
        )),
        StorageBackend::Supabase => {
            if !supabase.is_configured() {
                anyhow::bail!(
                    "STORAGE_BACKEND=supabase requires SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY"
                );
            }
            Arc::new(SupabaseStorage::new(
                supabase.url.clone(),
                supabase.service_role_key.clone(),
                config.bucket.clone(),
                config.max_upload_bytes,
                supabase.timeout,
            )?)
        }
    };

    Ok(storage)
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let database_config = DatabaseConfig::from_env().context("DATABASE_URL must be set")?;
    let db = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&db)
        .await
        .context("Failed to run database migrations")?;

    let supabase_config = SupabaseConfig::from_env();
    let identity: Arc<dyn IdentityProvider> =
        Arc::new(SupabaseIdentityProvider::new(&supabase_config)?);

    let storage_config = StorageConfig::from_env();
    let storage = init_storage(&storage_config, &supabase_config)?;

    Ok(AppState::new(
        db,
        identity,
        storage_config,
        storage,
        CorsConfig::from_env(),
    ))
}
