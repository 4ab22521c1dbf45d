//! Seed command - Inserts demo data into empty tables.

use std::sync::Arc;

use crate::config::Config;
use crate::domain::Argon2Hasher;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::{SeedReport, Seeder};

/// Run the seed routine against an already migrated database.
pub async fn run(database: &Database) -> AppResult<SeedReport> {
    let uow = Arc::new(Persistence::new(database.get_connection()));
    Seeder::new(uow, Arc::new(Argon2Hasher::new())).run().await
}

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config.database_url).await?;
    let report = run(&db).await?;

    println!(
        "Inserted {} user(s), {} student(s), {} course(s), {} grade(s)",
        report.users, report.students, report.courses, report.grades
    );

    Ok(())
}
