//! # Bookstore Seed
//!
//! Creates the schema and inserts the default members, books and sales.
//!
//! ## Usage
//! ```bash
//! # Seed ./bookstore.db (or $BOOKSTORE_DB_PATH)
//! cargo run -p bookstore-db --bin seed
//!
//! # Specify database path
//! cargo run -p bookstore-db --bin seed -- --db ./data/bookstore.db
//!
//! # More logging
//! RUST_LOG=debug cargo run -p bookstore-db --bin seed
//! ```
//!
//! Running it again is safe: rows that already exist are left alone.

use std::env;
use std::process;

use bookstore_db::{seed_defaults, Database, DbConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info,bookstore=debug,sqlx=warn";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Seed { db_path: Option<String> },
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut db_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                let path = args
                    .get(i + 1)
                    .filter(|value| !value.starts_with('-'))
                    .ok_or_else(|| format!("{} requires a path", args[i]))?;
                db_path = Some(path.clone());
                i += 1;
            }
            "--help" | "-h" => return Ok(Command::Help),
            other => {
                eprintln!("Ignoring unknown argument: {other}");
            }
        }
        i += 1;
    }

    Ok(Command::Seed { db_path })
}

fn print_help() {
    println!("Bookstore Ledger Seed");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -d, --db <PATH>    Database file path (default: $BOOKSTORE_DB_PATH or ./bookstore.db)");
    println!("  -h, --help         Show this help message");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let db_path = match parse_args(&args) {
        Ok(Command::Help) => {
            print_help();
            return Ok(());
        }
        Ok(Command::Seed { db_path }) => db_path,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("Run with --help for usage.");
            process::exit(2);
        }
    };

    init_tracing();

    let config = match db_path {
        Some(path) => DbConfig::new(path),
        None => DbConfig::from_env()?,
    };

    println!("Bookstore Ledger Seed");
    println!("=====================");
    println!("Database: {}", config.database_path.display());
    println!();

    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let summary = seed_defaults(&db).await?;

    if summary.is_empty() {
        println!("✓ Default rows already present, nothing inserted");
    } else {
        println!("✓ Inserted {}", serde_json::to_string(&summary)?);
    }

    println!();
    println!("Members: {}", db.members().count().await?);
    println!("Books:   {}", db.books().count().await?);
    println!("Sales:   {}", db.sales().count().await?);

    db.close().await;

    Ok(())
}
