use crate::{
    adapters::persistence::PostgresPersistence,
    infra::db::{init_db, run_migrations},
};

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod password;
pub mod setup;

pub async fn postgres_persistence(
    database_url: &str,
    max_connections: u32,
) -> anyhow::Result<PostgresPersistence> {
    let pool = init_db(database_url, max_connections).await?;
    run_migrations(&pool).await?;
    Ok(PostgresPersistence::new(pool))
}
