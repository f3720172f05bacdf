//! Create the database file and tables without serving

use anyhow::{Context, Result};
use clap::Parser;

use fpso_server::db;

use super::DatabaseArgs;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let db_config = args.database.config();

    let pool = db::open(&db_config)
        .await
        .with_context(|| format!("Failed to open database at {}", db_config.path.display()))?;
    pool.close().await;

    println!("Database ready at {}", db_config.path.display());
    Ok(())
}
