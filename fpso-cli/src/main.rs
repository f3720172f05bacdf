//! fpso CLI - vessel and equipment registry
//!
//! Entry point for the `fpso` binary:
//! - `serve` runs the HTTP/JSON API
//! - `init-db` creates the SQLite file and tables

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "fpso",
    author,
    version,
    about = "Registry of FPSO vessels and their mounted equipment",
    long_about = "Serve a JSON API over a single SQLite file holding vessels and the \
                  equipment mounted on them."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the database file and tables, then exit
    InitDb(commands::init_db::InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::InitDb(args) => commands::run_init_db(args).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_defaults() {
        let cli = Cli::try_parse_from(["fpso", "serve"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.bind.port(), 5000);
        assert!(!args.cors_permissive);
    }

    #[test]
    fn db_path_flag() {
        let cli = Cli::try_parse_from(["fpso", "--debug", "init-db", "--db", "/tmp/x.db"]).unwrap();
        assert!(cli.debug);
        let Commands::InitDb(args) = cli.command else {
            panic!("expected init-db");
        };
        assert_eq!(args.database.db_path.to_str(), Some("/tmp/x.db"));
    }
}
