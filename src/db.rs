use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};

use crate::entity::{Donations, Favorites, Products, Users};

pub type OrmConn = DatabaseConnection;

/// Create a SeaORM connection.
pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);
    // Every pooled connection to an in-memory SQLite database sees its own
    // empty database, so keep exactly one alive.
    if database_url.starts_with("sqlite::memory:") {
        options.max_connections(1).min_connections(1);
    }
    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Creates any missing table from the entity definitions, parents first.
pub async fn sync_schema(conn: &DatabaseConnection) -> Result<()> {
    create_table(conn, Users).await?;
    create_table(conn, Products).await?;
    create_table(conn, Favorites).await?;
    create_table(conn, Donations).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(conn: &DatabaseConnection, entity: E) -> Result<()> {
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);
    let table = entity.table_name().to_owned();
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    conn.execute(backend.build(&stmt)).await?;
    tracing::debug!(%table, "table ready");
    Ok(())
}
