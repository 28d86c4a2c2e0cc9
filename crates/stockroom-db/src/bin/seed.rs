//! # Seed Data Generator
//!
//! Populates the database with sample inventory data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p stockroom-db --bin seed
//!
//! # Custom catalog size / database path
//! cargo run -p stockroom-db --bin seed -- --products 200 --db ./data/stockroom.db
//! ```
//!
//! ## Generated Data
//! - A product catalog across a few supply categories, with varied prices
//!   and stock levels (some at zero, some low, some high)
//! - A handful of customers
//! - Sales recorded through the real sale transaction, so stock and derived
//!   totals stay consistent
//! - One analytics rollup per early product

use std::env;

use tracing_subscriber::EnvFilter;

use stockroom_core::{NewAnalytics, NewCustomer, NewProduct, SaleOutcome};
use stockroom_db::{Database, DbConfig};

/// Category / product-name pools for plausible catalog entries.
const CATALOG: &[(&str, &[&str])] = &[
    (
        "Office",
        &[
            "Stapler", "Staples Box", "Paper Clips", "Ballpoint Pens", "Gel Pens",
            "Highlighters", "Sticky Notes", "Legal Pads", "Ring Binder", "File Folders",
        ],
    ),
    (
        "Paper",
        &[
            "A4 Paper Ream", "Letter Paper Ream", "Card Stock", "Envelopes", "Shipping Labels",
            "Graph Paper", "Notebook", "Index Cards", "Poster Board", "Kraft Paper Roll",
        ],
    ),
    (
        "Tech",
        &[
            "USB-C Cable", "Wireless Mouse", "Keyboard", "Webcam", "Monitor Stand",
            "Laptop Sleeve", "HDMI Cable", "Power Strip", "Desk Lamp", "Headset",
        ],
    ),
    (
        "Breakroom",
        &[
            "Coffee Beans", "Paper Cups", "Napkins", "Tea Assortment", "Sugar Packets",
            "Creamer", "Paper Towels", "Dish Soap", "Trash Bags", "Water Filter",
        ],
    ),
];

const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Ada", "Lovelace", "ada@example.com"),
    ("Grace", "Hopper", "grace@example.com"),
    ("Edsger", "Dijkstra", "edsger@example.com"),
    ("Barbara", "Liskov", "barbara@example.com"),
    ("Tony", "Hoare", "tony@example.com"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut product_count: usize = 40;
    let mut db_path = String::from("./stockroom_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--products" | "-p" => {
                if i + 1 < args.len() {
                    product_count = args[i + 1].parse().unwrap_or(40);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -p, --products <N>  Number of products to generate (default: 40)");
                println!("  -d, --db <PATH>     Database file path (default: ./stockroom_dev.db)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Stockroom Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Products: {}", product_count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Products
    println!();
    println!("Generating products...");

    let mut product_ids = Vec::new();
    let mut generated = 0;

    'outer: for (category, names) in CATALOG {
        for (idx, name) in names.iter().enumerate() {
            if generated >= product_count {
                break 'outer;
            }

            let seed = product_ids.len();
            let product = db
                .products()
                .insert(NewProduct {
                    name: format!("{name} ({category})"),
                    description: format!("{category} supply: {name}"),
                    // $0.99 - $249.99, deterministic spread
                    unit_price_cents: 99 + ((seed * 7919) % 24_900) as i64,
                    // 0-120 units so every stock tier is represented
                    quantity_on_hand: ((seed * 31 + idx) % 121) as i64,
                    image_path: None,
                })
                .await?;

            product_ids.push(product.id);
            generated += 1;
        }
    }

    println!("✓ Generated {} products", generated);

    // Customers
    let mut customer_ids = Vec::new();
    for (first, last, email) in CUSTOMERS {
        let customer = db
            .customers()
            .insert(NewCustomer {
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: email.to_string(),
                phone_number: String::new(),
                address: String::new(),
            })
            .await?;
        customer_ids.push(customer.id);
    }

    println!("✓ Generated {} customers", customer_ids.len());

    // Sales, through the real transaction so stock stays consistent.
    let mut committed = 0;
    let mut rejected = 0;
    for (seed, product_id) in product_ids.iter().enumerate() {
        let quantity = (seed % 7 + 1) as i64;
        let customer_id = customer_ids.get(seed % (customer_ids.len() + 1));

        match db
            .sales()
            .attempt_sale(product_id, quantity, customer_id.map(String::as_str))
            .await?
        {
            SaleOutcome::Committed(_) => committed += 1,
            SaleOutcome::Rejected(_) => rejected += 1,
        }
    }

    println!("✓ Recorded {} sales ({} rejected for stock)", committed, rejected);

    // Analytics rollups for the first half of the catalog.
    let mut rollups = 0;
    for (seed, product_id) in product_ids.iter().take(product_ids.len() / 2).enumerate() {
        db.analytics()
            .insert(NewAnalytics {
                product_id: product_id.clone(),
                sales_count: (seed % 40) as i64,
                revenue_cents: ((seed * 613) % 90_000) as i64,
            })
            .await?;
        rollups += 1;
    }

    println!("✓ Generated {} analytics rollups", rollups);

    let summary = db.dashboard().summary().await?;
    println!();
    println!("Dashboard after seeding:");
    println!("  products:         {}", summary.total_products);
    println!("  units on hand:    {}", summary.total_quantity_on_hand);
    println!("  units sold:       {}", summary.total_quantity_sold);
    println!("  revenue:          {}", summary.total_revenue());
    println!("  customers:        {}", summary.total_customers);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
