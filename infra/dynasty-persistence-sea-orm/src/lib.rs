use async_lock::OnceCell;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};

pub mod accounts;
pub mod coaches;
pub mod dynasties;
pub mod entity;
mod season_document;

static DB_POOL: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn create_db_pool() -> DatabaseConnection {
    DB_POOL
        .get_or_init(|| async move {
            let db_url = database_url();
            let mut opt = ConnectOptions::new(&db_url);
            opt.max_connections(5);
            opt.sqlx_logging_level(log::LevelFilter::Debug);

            Database::connect(opt)
                .await
                .expect("Failed to connect to database")
        })
        .await
        .clone()
}

fn database_url() -> String {
    let var = |name: &str| std::env::var(name).unwrap_or_else(|_| panic!("{} must be set", name));
    format!(
        "mysql://{}:{}@{}:{}/{}",
        var("MARIADB_USER"),
        var("MARIADB_PASSWORD"),
        var("MARIADB_HOST"),
        var("MARIADB_PORT"),
        var("MARIADB_DATABASE")
    )
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e, DbErr::RecordNotInserted)
        || matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
