use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::models::{EmployeeCreate, Role};
use crate::db::repository::employee;
use crate::db::DbService;
use crate::utils::{time, AppError};

/// Server state - shared handles for every request
///
/// Cheap to clone: the pool is internally reference counted and the
/// JWT service is behind an `Arc`. No entity state is cached here;
/// the pool is the only shared mutable resource.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration (immutable after startup)
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT session token service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            pool,
            jwt_service,
        }
    }

    /// Initialize server state: open the database, apply migrations,
    /// build the JWT service and seed the bootstrap admin if configured.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db_service = DbService::new(&config.database_path).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let state = Self::new(config.clone(), db_service.pool, jwt_service);
        state.seed_admin().await?;
        Ok(state)
    }

    /// Seed a bootstrap admin account when none exists yet
    ///
    /// Skipped silently when ADMIN_EMAIL / ADMIN_PASSWORD are unset or
    /// an active admin is already present.
    pub async fn seed_admin(&self) -> Result<(), AppError> {
        let (email, password) = match (&self.config.admin_email, &self.config.admin_password) {
            (Some(e), Some(p)) => (e.clone(), p.clone()),
            _ => return Ok(()),
        };

        if employee::admin_exists(&self.pool).await.map_err(AppError::from)? {
            return Ok(());
        }

        let created = employee::create(
            &self.pool,
            EmployeeCreate {
                email: email.clone(),
                password,
                first_name: "System".to_string(),
                last_name: "Administrator".to_string(),
                department: None,
                position: None,
                role: Role::Admin,
                leave_balance: None,
            },
            time::now_millis(),
        )
        .await
        .map_err(AppError::from)?;

        tracing::info!(admin_id = created.id, email = %email, "Bootstrap admin created");
        Ok(())
    }

    /// JWT service handle
    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Business timezone for day-boundary calculations
    pub fn timezone(&self) -> chrono_tz::Tz {
        self.config.timezone
    }
}
