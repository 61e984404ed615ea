use std::time::Duration;

use anyhow::{Result, bail};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::DatabaseConfig;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const SQLITE_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbBackendKind {
    Postgres,
    Sqlite,
}

impl DbBackendKind {
    pub fn from_url(url: &str) -> Result<Self> {
        let normalized = url.trim().to_ascii_lowercase();
        if normalized.starts_with("postgres://") || normalized.starts_with("postgresql://") {
            return Ok(Self::Postgres);
        }
        if normalized.starts_with("sqlite:") {
            return Ok(Self::Sqlite);
        }
        bail!(
            "unsupported database url '{}'; expected scheme postgres://, postgresql://, or sqlite:",
            redact_url(url)
        )
    }
}

pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    let backend = DbBackendKind::from_url(&cfg.url)?;

    let mut options = ConnectOptions::new(cfg.url.clone());
    options
        .max_connections(cfg.max_connections)
        .min_connections(cfg.min_idle)
        .connect_timeout(CONNECT_TIMEOUT)
        .sqlx_logging(false);
    if backend == DbBackendKind::Sqlite {
        // Applied on every pooled connection, not just the first one.
        options.map_sqlx_sqlite_opts(|opts| opts.busy_timeout(SQLITE_BUSY_TIMEOUT));
    }

    let db = Database::connect(options).await?;

    info!(backend = ?backend, "syncing database schema from entities");
    db.get_schema_registry("todos_api::db::entities::*")
        .sync(&db)
        .await?;
    Ok(db)
}

fn redact_url(url: &str) -> String {
    let trimmed = url.trim();
    if let Some((scheme, _)) = trimmed.split_once("://") {
        format!("{scheme}://<redacted>")
    } else if let Some((scheme, _)) = trimmed.split_once(':') {
        format!("{scheme}:<redacted>")
    } else {
        "<invalid-url>".to_string()
    }
}
