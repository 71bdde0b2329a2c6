use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;
use uuid::Uuid;

use crate::{config::Config, notify::Mailer};

pub const SEED_ADMIN_USERNAME: &str = "admin";
pub const SEED_ADMIN_PASSWORD: &str = "password123";

#[derive(Clone)]
pub struct AppState {
    pool: PgPool,
    config: Arc<Config>,
    mailer: Mailer,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("failed to connect to Postgres")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run database migrations")?;

        let mailer = Mailer::new(&config.smtp, &config.notify_email)
            .context("failed to initialize mailer")?;

        Ok(Self {
            pool,
            config: Arc::new(config),
            mailer,
        })
    }

    /// Seeds the single operator account on first boot. No endpoint creates
    /// admin users, so an empty table would lock the dashboard out entirely.
    pub async fn ensure_seed_admin(&self) -> Result<()> {
        let has_admin: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM admin_users)")
            .fetch_one(&self.pool)
            .await
            .context("failed to verify admin presence")?;

        if !has_admin {
            let password_hash = crate::web::auth::hash_password(SEED_ADMIN_PASSWORD)
                .map_err(|err| anyhow!("failed to hash seed admin password: {err}"))?;

            sqlx::query("INSERT INTO admin_users (id, username, password_hash) VALUES ($1, $2, $3)")
                .bind(Uuid::new_v4())
                .bind(SEED_ADMIN_USERNAME)
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .context("failed to insert seed admin user")?;

            info!(
                "Seeded default admin user '{SEED_ADMIN_USERNAME}' (password: '{SEED_ADMIN_PASSWORD}'). Update it promptly."
            );
        }

        Ok(())
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    pub fn pool_ref(&self) -> &PgPool {
        &self.pool
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mailer(&self) -> &Mailer {
        &self.mailer
    }
}
