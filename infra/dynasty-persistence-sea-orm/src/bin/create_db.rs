use dynasty_persistence_sea_orm::{
    create_db_pool,
    entity::{account, coach, dynasty, dynasty_access},
};
use sea_orm::{ConnectionTrait, DatabaseBackend, Schema};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let pool = create_db_pool().await;
    let schema = Schema::new(DatabaseBackend::MySql);

    pool.execute(&schema.create_table_from_entity(account::Entity))
        .await
        .expect("Failed to create accounts table");
    pool.execute(&schema.create_table_from_entity(dynasty::Entity))
        .await
        .expect("Failed to create dynasties table");
    pool.execute(&schema.create_table_from_entity(dynasty_access::Entity))
        .await
        .expect("Failed to create dynasty access table");
    pool.execute(&schema.create_table_from_entity(coach::Entity))
        .await
        .expect("Failed to create coaches table");

    println!("Created database tables successfully");
}
