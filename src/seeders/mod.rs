pub mod admin_seeder;
pub mod tag_seeder;

use sea_orm::DatabaseConnection;

pub async fn run_seeders(db: &DatabaseConnection) -> Result<(), String> {
    admin_seeder::seed_admin_user(db).await?;
    tag_seeder::seed_tags(db).await?;
    Ok(())
}
