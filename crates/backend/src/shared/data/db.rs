use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Схема создаётся при старте; существующие таблицы не трогаются
const SCHEMA: &[(&str, &str)] = &[
    (
        "a001_warehouse",
        r#"
        CREATE TABLE IF NOT EXISTS a001_warehouse (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            address TEXT
        );
        "#,
    ),
    (
        "a002_warehouse_transfer",
        r#"
        CREATE TABLE IF NOT EXISTS a002_warehouse_transfer (
            id TEXT PRIMARY KEY NOT NULL,
            request_code TEXT NOT NULL UNIQUE,
            source_warehouse_id INTEGER NOT NULL,
            destination_warehouse_id INTEGER NOT NULL,
            fulfilling_warehouse_id INTEGER,
            products_json TEXT,
            request_date TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            notes TEXT,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a003_export_request",
        r#"
        CREATE TABLE IF NOT EXISTS a003_export_request (
            id TEXT PRIMARY KEY NOT NULL,
            request_code TEXT NOT NULL UNIQUE,
            agency_name TEXT NOT NULL,
            warehouse_id INTEGER NOT NULL,
            lines_json TEXT,
            request_date TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'requested',
            notes TEXT,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a004_export_receipt",
        r#"
        CREATE TABLE IF NOT EXISTS a004_export_receipt (
            id TEXT PRIMARY KEY NOT NULL,
            receipt_code TEXT NOT NULL UNIQUE,
            export_request_id TEXT NOT NULL UNIQUE,
            request_code TEXT NOT NULL,
            warehouse_id INTEGER NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            lines_json TEXT,
            notes TEXT,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "sys_users",
        r#"
        CREATE TABLE IF NOT EXISTS sys_users (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            full_name TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_admin INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            last_login_at TEXT
        );
        "#,
    ),
    (
        "sys_settings",
        r#"
        CREATE TABLE IF NOT EXISTS sys_settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            description TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    ),
];

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/warehouse.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Windows: C:\x -> sqlite:///C:/x
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    tracing::info!("Opening database: {}", db_url);
    let conn = Database::connect(&db_url).await?;

    for (table, sql) in SCHEMA {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await
            .map_err(|e| anyhow::anyhow!("failed to create table {}: {}", table, e))?;
        tracing::debug!("Table {} ready", table);
    }

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
