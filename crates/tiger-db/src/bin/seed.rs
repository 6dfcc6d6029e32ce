//! # Seed Data Generator
//!
//! Populates a development database with the event catalog and, optionally,
//! a batch of demo orders so the size summary has something to show.
//!
//! ## Usage
//! ```bash
//! # Catalog only
//! cargo run -p tiger-db --bin seed
//!
//! # Catalog plus 200 demo orders
//! cargo run -p tiger-db --bin seed -- --orders 200
//!
//! # Specify database path
//! cargo run -p tiger-db --bin seed -- --db ./data/tiger.db
//! ```
//!
//! ## Generated Catalog
//! - `1` / `2`: the two single shirts
//! - `3`: the pair pack, a combo of one `1` and one `2`
//! - `4`: the polo

use std::env;
use tiger_core::combo::ComboComponentInput;
use tiger_core::order::{price_order, NewOrder, NewOrderItem};
use tiger_core::{Money, NewShirtDesign, SizeCode};
use tiger_db::{Database, DbConfig};

/// `(id, name, price in baht, display order)`
const DESIGNS: &[(&str, &str, i64, i64)] = &[
    ("1", "เสื้อเสือ ลายคลาสสิก", 750, 1),
    ("2", "เสื้อเสือ ลายกราฟิก", 700, 2),
    ("3", "แพ็คคู่ (ลายคลาสสิก + ลายกราฟิก)", 1350, 3),
    ("4", "เสื้อโปโล Tiger Meeting", 890, 4),
];

const CUSTOMER_NAMES: &[&str] = &["สมชาย", "สมหญิง", "Nok", "Ploy", "Beam", "Ton", "Fah", "Mint"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut orders: usize = 0;
    let mut db_path = String::from("./tiger_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--orders" | "-o" => {
                if i + 1 < args.len() {
                    orders = args[i + 1].parse().unwrap_or(0);
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
                println!("Tiger Shirts Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -o, --orders <N>   Number of demo orders to create (default: 0)");
                println!("  -d, --db <PATH>    Database file path (default: ./tiger_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Tiger Shirts Seed Data Generator");
    println!("===================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if !db.designs().list_all().await?.is_empty() {
        println!("⚠ Catalog already present, skipping seed.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    for (id, name, baht, display_order) in DESIGNS {
        db.designs()
            .insert(&NewShirtDesign {
                id: id.to_string(),
                name: name.to_string(),
                description: String::new(),
                price_satang: Money::from_baht(*baht).satang(),
                front_image: None,
                back_image: None,
                display_order: *display_order,
            })
            .await?;
    }
    println!("✓ Inserted {} designs", DESIGNS.len());

    db.combos()
        .create_or_replace(
            "3",
            &[ComboComponentInput::new("1", 1), ComboComponentInput::new("2", 1)],
        )
        .await?;
    println!("✓ Linked pair pack 3 → 1 + 2");

    if orders > 0 {
        let prices = db.designs().price_map().await?;
        let start = std::time::Instant::now();

        for n in 0..orders {
            let form = demo_order(n);
            let priced = price_order(&form, &prices, Money::from_baht(50))?;
            db.orders().create(&form, &priced).await?;
        }

        println!("✓ Created {} demo orders in {:?}", orders, start.elapsed());
    }

    println!();
    println!("✓ Seed complete!");
    Ok(())
}

/// A deterministic order that spreads quantities over designs and sizes.
fn demo_order(n: usize) -> NewOrder {
    let line = |offset: usize| NewOrderItem {
        design: DESIGNS[(n + offset) % DESIGNS.len()].0.to_string(),
        // Middle sizes are the common ones
        size: SizeCode::ALL[3 + (n * 7 + offset * 3) % 6].as_str().to_string(),
        quantity: 1 + ((n + offset) % 3) as i64,
    };

    let is_pickup = n % 4 == 0;
    NewOrder {
        name: CUSTOMER_NAMES[n % CUSTOMER_NAMES.len()].to_string(),
        phone: Some(format!("08{:08}", n)),
        address: (!is_pickup).then(|| format!("{} ถนนสุขุมวิท กรุงเทพฯ", n + 1)),
        is_pickup,
        slip_image: format!("https://blob.example/slips/demo-{}.jpg", n),
        items: (0..1 + n % 2).map(line).collect(),
    }
}
