use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    auth::jwt::JwtKeys,
    config::AppConfig,
    usuarios::repo::{PgUserRepository, UserRepository},
};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub config: Arc<AppConfig>,
    pub jwt: JwtKeys,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("run migrations")?;
        tracing::info!("migrations applied");

        let users = Arc::new(PgUserRepository::new(db)) as Arc<dyn UserRepository>;
        Ok(Self::from_parts(users, Arc::new(config)))
    }

    pub fn from_parts(users: Arc<dyn UserRepository>, config: Arc<AppConfig>) -> Self {
        let jwt = JwtKeys::new(&config.jwt);
        Self { users, config, jwt }
    }

    /// State over an in-memory repository and the test config.
    #[cfg(test)]
    pub fn fake() -> (Self, Arc<crate::usuarios::memory::InMemoryUserRepository>) {
        let repo = Arc::new(crate::usuarios::memory::InMemoryUserRepository::new());
        let state = Self::from_parts(repo.clone(), Arc::new(AppConfig::test()));
        (state, repo)
    }
}
