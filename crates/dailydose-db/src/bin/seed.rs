//! # Seed Data Generator
//!
//! Populates the database with the house menu and an admin profile.
//!
//! ## Usage
//! ```bash
//! # Seed ./dailydose.db
//! cargo run -p dailydose-db --bin seed
//!
//! # Specify database path and admin account
//! cargo run -p dailydose-db --bin seed -- --db ./data/dailydose.db --admin owner@dailydose.test
//! ```
//!
//! ## Generated Data
//! - Four drinks per menu category (classic, fruit, specialty, coffee)
//! - Stock spread across the badge thresholds (plenty, low, sold out)
//! - One admin profile whose id must match the `sub` of the owner's session

use chrono::Utc;
use dailydose_core::{Category, Money, ProductDraft, Profile, Role};
use dailydose_db::{Database, DbConfig, DbError};
use std::env;
use uuid::Uuid;

/// (category, name, description, price in cents, stock)
const MENU: &[(Category, &str, &str, i64, i64)] = &[
    (Category::Classic, "Classic Milk Tea", "Black tea, fresh milk, chewy pearls", 450, 40),
    (Category::Classic, "Taro Milk Tea", "Creamy purple yam with jasmine tea", 499, 25),
    (Category::Classic, "Wintermelon Tea", "Caramelized wintermelon syrup over ice", 425, 8),
    (Category::Classic, "Okinawa Milk Tea", "Roasted brown sugar and assam", 525, 15),
    (Category::Fruit, "Mango Green Tea", "Fresh mango with jasmine green tea", 499, 30),
    (Category::Fruit, "Passion Fruit Tea", "Tart passion fruit and popping boba", 475, 6),
    (Category::Fruit, "Strawberry Yakult", "Strawberry puree and cultured milk", 550, 0),
    (Category::Fruit, "Lychee Oolong", "Lychee jelly over cold-brewed oolong", 499, 18),
    (Category::Specialty, "Brown Sugar Boba", "Tiger stripes, fresh milk, warm pearls", 599, 50),
    (Category::Specialty, "Matcha Cream Cloud", "Ceremonial matcha with sea salt foam", 625, 12),
    (Category::Specialty, "Ube Cheese Foam", "Ube latte under whipped cream cheese", 650, 3),
    (Category::Specialty, "Thai Tea Float", "Thai tea with vanilla soft serve", 575, 20),
    (Category::Coffee, "Iced Latte", "Double espresso over milk", 450, 35),
    (Category::Coffee, "Vietnamese Coffee", "Dark roast with condensed milk", 475, 14),
    (Category::Coffee, "Caramel Macchiato", "Vanilla milk, espresso, caramel drizzle", 525, 9),
    (Category::Coffee, "Coffee Jelly Frappe", "Blended coffee with coffee jelly", 575, 0),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./dailydose.db");
    let mut admin_email = String::from("admin@dailydose.test");
    let mut admin_id: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--admin" | "-a" => {
                if i + 1 < args.len() {
                    admin_email = args[i + 1].clone();
                    i += 1;
                }
            }
            "--admin-id" => {
                if i + 1 < args.len() {
                    admin_id = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Daily Dose Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>       Database file path (default: ./dailydose.db)");
                println!("  -a, --admin <EMAIL>   Admin profile email (default: admin@dailydose.test)");
                println!("      --admin-id <ID>   Admin profile id (default: random UUID)");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Daily Dose Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} menu items", existing);
        println!("  Skipping menu to avoid duplicates.");
    } else {
        let mut inserted = 0;
        for (category, name, description, cents, stock) in MENU {
            let draft = ProductDraft {
                name: name.to_string(),
                description: description.to_string(),
                price: Money::from_minor(*cents),
                stock: *stock,
                category: *category,
                image: Some(format!(
                    "/images/{}.png",
                    name.to_lowercase().replace(' ', "-")
                )),
            };

            if let Err(e) = db.products().insert(&draft).await {
                eprintln!("Failed to insert {}: {}", name, e);
                continue;
            }
            inserted += 1;
        }
        println!("✓ Inserted {} menu items", inserted);
    }

    let admin = Profile {
        id: admin_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        username: "admin".to_string(),
        email: admin_email,
        role: Role::Admin,
        created_at: Utc::now(),
    };
    match db.profiles().upsert(&admin).await {
        Ok(()) => println!("✓ Admin profile {} ({})", admin.email, admin.id),
        Err(DbError::UniqueViolation { .. }) => {
            println!("⚠ A profile with email {} already exists", admin.email)
        }
        Err(e) => return Err(e.into()),
    }

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
