//! # Seed Data Generator
//!
//! Populates the database with development data for the two branches.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p corte-db --bin seed
//!
//! # Specify database path
//! cargo run -p corte-db --bin seed -- --db ./data/corte.db
//! ```
//!
//! Seeds classic cuts with realistic starting stock, then a handful of
//! sales and expenses so the dashboard has something to show.

use std::env;

use corte_core::report::render_closing_report;
use corte_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// The two branches of the deployment.
const BRANCHES: &[&str] = &["Super Montaña", "Carnicería Zona Norte"];

/// Cuts and their starting stock in kilograms.
const CUTS: &[(&str, f64)] = &[
    ("Vacío", 18.0),
    ("Asado", 25.0),
    ("Matambre", 12.0),
    ("Costilla", 16.0),
    ("Bife de Chorizo", 9.0),
    ("Entraña", 6.5),
    ("Picada Especial", 10.0),
];

/// (product, kilograms, amount charged) per branch.
const SALES: &[(&str, f64, f64)] = &[
    ("Vacío", 2.5, 11250.0),
    ("Asado", 4.0, 14800.0),
    ("Entraña", 1.2, 7440.0),
];

/// (amount, memo) per branch.
const EXPENSES: &[(f64, &str)] = &[(3500.0, "ice"), (12000.0, "delivery fuel")];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut db_path = "./corte_dev.db".to_string();

    let args: Vec<String> = env::args().collect();
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
                println!("Corte POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./corte_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Corte POS Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Skip if any branch already has a catalog
    for branch in BRANCHES {
        if !db.stock().get(branch).await?.is_empty() {
            println!("⚠ Branch '{}' already has products", branch);
            println!("  Skipping seed to avoid duplicates.");
            println!("  Delete the database file to regenerate.");
            return Ok(());
        }
    }

    let coordinator = db.coordinator();
    let mut products = 0;
    let mut movements = 0;

    for branch in BRANCHES {
        for (cut, kilograms) in CUTS {
            coordinator.register_restock(branch, cut, *kilograms).await?;
            products += 1;
        }

        for (cut, kilograms, amount) in SALES {
            coordinator
                .register_sale(branch, cut, *kilograms, *amount)
                .await?;
            movements += 1;
        }

        for (amount, memo) in EXPENSES {
            coordinator.register_expense(branch, *amount, memo).await?;
            movements += 1;
        }

        let totals = db.ledger().totals(branch).await?;
        println!(
            "✓ {}: {} cuts, balance $ {:.2}",
            branch,
            CUTS.len(),
            totals.balance()
        );
    }

    // Show the closing report for the first branch as a smoke check
    let branch = BRANCHES[0];
    let lines = db.stock().get(branch).await?;
    let entries = db.ledger().list(branch).await?;
    let totals = db.ledger().totals(branch).await?;
    println!();
    println!(
        "{}",
        render_closing_report(branch, db.engine().mode, &lines, &entries, &totals)
    );

    println!();
    println!(
        "✓ Seeded {} product rows and {} ledger entries across {} branches",
        products,
        movements,
        BRANCHES.len()
    );

    db.close().await;
    Ok(())
}
