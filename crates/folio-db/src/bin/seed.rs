//! # Seed Data Generator
//!
//! Populates the database with a starter catalog and a few customers for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p folio-db --bin seed
//!
//! # Specify database path
//! cargo run -p folio-db --bin seed -- --db ./data/folio.db
//! ```
//!
//! ## Generated Data
//! - A catalog spread across all three pricing categories
//! - Customers at interesting loyalty balances: fresh (0), close to the
//!   redemption threshold (9), and past it (12)

use std::env;
use uuid::Uuid;

use folio_core::{Book, BookCategory, Customer};
use folio_db::{Database, DbConfig};

/// Starter catalog: (title, author, price in cents, category).
const BOOKS: &[(&str, &str, i64, BookCategory)] = &[
    ("The Quantum Garden", "Derek Künsken", 2499, BookCategory::NewRelease),
    ("Translation State", "Ann Leckie", 2799, BookCategory::NewRelease),
    ("System Collapse", "Martha Wells", 2599, BookCategory::NewRelease),
    ("The Left Hand of Darkness", "Ursula K. Le Guin", 1599, BookCategory::Regular),
    ("Dune", "Frank Herbert", 1899, BookCategory::Regular),
    ("Hyperion", "Dan Simmons", 1699, BookCategory::Regular),
    ("A Fire Upon the Deep", "Vernor Vinge", 1499, BookCategory::Regular),
    ("The Dispossessed", "Ursula K. Le Guin", 1399, BookCategory::Regular),
    ("Foundation", "Isaac Asimov", 999, BookCategory::OldEdition),
    ("I, Robot", "Isaac Asimov", 899, BookCategory::OldEdition),
    ("The Time Machine", "H. G. Wells", 699, BookCategory::OldEdition),
    ("Twenty Thousand Leagues Under the Seas", "Jules Verne", 799, BookCategory::OldEdition),
];

/// Starter customers: (name, loyalty points).
const CUSTOMERS: &[(&str, i64)] = &[
    ("Ada Lovelace", 0),
    ("Grace Hopper", 4),
    ("Alan Turing", 9),
    ("Katherine Johnson", 12),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./folio_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Folio Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./folio_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Folio Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.books().list_all().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} books", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding catalog...");

    for (title, author, price_cents, category) in BOOKS {
        let book = Book::new(
            Uuid::new_v4().to_string(),
            *title,
            *author,
            *price_cents,
            *category,
        );
        db.books().insert(&book).await?;
    }
    println!("✓ {} books", BOOKS.len());

    println!("Seeding customers...");
    for (name, points) in CUSTOMERS {
        let customer = Customer::new(Uuid::new_v4().to_string(), *name, *points);
        db.customers().insert(&customer).await?;
    }
    println!("✓ {} customers", CUSTOMERS.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
