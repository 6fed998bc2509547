use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};
use std::path::Path;

/// Table definitions, applied with `CREATE TABLE IF NOT EXISTS` at startup
const SCHEMA: &[(&str, &str)] = &[
    (
        "a001_user",
        r#"
        CREATE TABLE IF NOT EXISTS a001_user (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            nickname TEXT,
            email TEXT,
            phone TEXT,
            role_id INTEGER,
            status TEXT NOT NULL DEFAULT 'ENABLED',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "a002_role",
        r#"
        CREATE TABLE IF NOT EXISTS a002_role (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            code TEXT NOT NULL UNIQUE,
            description TEXT,
            status TEXT NOT NULL DEFAULT 'ENABLED',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "a003_currency",
        r#"
        CREATE TABLE IF NOT EXISTS a003_currency (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            symbol TEXT NOT NULL,
            precision INTEGER NOT NULL DEFAULT 2,
            status TEXT NOT NULL DEFAULT 'ENABLED',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "a004_crypto_asset",
        r#"
        CREATE TABLE IF NOT EXISTS a004_crypto_asset (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            symbol TEXT NOT NULL,
            name TEXT NOT NULL,
            chain TEXT NOT NULL,
            contract_address TEXT,
            decimals INTEGER NOT NULL DEFAULT 18,
            status TEXT NOT NULL DEFAULT 'ENABLED',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE (symbol, chain)
        );
        "#,
    ),
    (
        "a005_payment_method",
        r#"
        CREATE TABLE IF NOT EXISTS a005_payment_method (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            code TEXT NOT NULL UNIQUE,
            currency_code TEXT NOT NULL,
            fee_rate REAL NOT NULL DEFAULT 0,
            sort_order INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'ENABLED',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
];

/// `sqlite://` URL for a database file, created on first connect
pub fn sqlite_url(db_file: &Path) -> String {
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = db_file.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Opens the database file (creating its directory) and bootstraps the schema.
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };

    tracing::info!("Opening database: {}", absolute.display());
    let conn = Database::connect(sqlite_url(&absolute)).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

/// Private in-memory database with the schema applied.
/// One pooled connection, since every SQLite memory connection is its own database.
pub async fn in_memory() -> Result<DatabaseConnection, sea_orm::DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

pub async fn bootstrap_schema(conn: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    for (table, sql) in SCHEMA {
        tracing::debug!("Ensuring table {}", table);
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_urls() {
        assert_eq!(
            sqlite_url(Path::new("/srv/db/manage.db")),
            "sqlite:///srv/db/manage.db?mode=rwc"
        );
        assert_eq!(
            sqlite_url(Path::new(r"C:\data\manage.db")),
            "sqlite:///C:/data/manage.db?mode=rwc"
        );
    }

    #[tokio::test]
    async fn bootstrap_is_idempotent() {
        let conn = in_memory().await.unwrap();
        bootstrap_schema(&conn).await.unwrap();

        let tables = conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type='table' AND name LIKE 'a00%'".to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(tables.len(), SCHEMA.len());
    }
}
