//! Command implementations for the fpso CLI

pub mod init_db;
pub mod serve;

pub use init_db::run_init_db;
pub use serve::run_serve;

use std::path::PathBuf;

use clap::Args;
use fpso_server::db::{DatabaseConfig, DEFAULT_DB_PATH};

/// Database location shared by every command
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// SQLite database file, created if missing
    #[arg(long = "db", env = "FPSO_DB_PATH", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,
}

impl DatabaseArgs {
    pub fn config(&self) -> DatabaseConfig {
        DatabaseConfig::at(&self.db_path)
    }
}
