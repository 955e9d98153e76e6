//! # Seed Data Generator
//!
//! Populates the database with sample sale entries for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 entries over the last 14 days (default)
//! cargo run -p salesdesk-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p salesdesk-db --bin seed -- --count 1000 --days 30
//!
//! # Specify database path
//! cargo run -p salesdesk-db --bin seed -- --db ./data/salesdesk.db
//! ```
//!
//! ## Generated Entries
//! Entries are built through the encoder form, so prices, discounts and
//! payment/inventory inclusion follow the same rules as real encoding:
//! - every package type, quantities 1-3 (blister counts 1-5)
//! - discounts cycling through the dropdown options
//! - a mix of cash, e-wallet and bank transfer payments, some split
//! - released / to-follow stock on most entries
//!
//! A cash count is also saved for every seeded day.

use chrono::{Duration, Utc};
use std::env;

use salesdesk_core::cash::{normalize_lines, CashLineInput, DENOMINATIONS};
use salesdesk_core::encoder::{EncoderForm, FormField, MEMBER_TYPE_OPTIONS};
use salesdesk_core::pricing::{PackageType, DISCOUNT_OPTIONS};
use salesdesk_db::{Database, DbConfig};

const MEMBER_NAMES: &[&str] = &[
    "Ana Cruz",
    "Ben Reyes",
    "Carla Diaz",
    "Dan Santos",
    "Ella Garcia",
    "Fred Mendoza",
    "Gina Torres",
    "Hector Ramos",
    "Ivy Flores",
    "Jun Villanueva",
    "José Peña",
];

/// (mode, mode type) pairs used for payment 1.
const PAYMENT_MODES: &[(&str, &str)] = &[
    ("cash", ""),
    ("cash", ""),
    ("e-wallet", "gcash"),
    ("e-wallet", "maya"),
    ("bank-transfer", "bdo"),
    ("bank-transfer", "bpi"),
    ("cheque", ""),
];

const SEEDER: &str = "seed";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut days: i64 = 14;
    let mut db_path = String::from("./salesdesk_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--days" => {
                if i + 1 < args.len() {
                    days = args[i + 1].parse().unwrap_or(14).max(1);
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
                println!("SalesDesk Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of entries to generate (default: 200)");
                println!("      --days <N>     Spread entries over the last N days (default: 14)");
                println!("  -d, --db <PATH>    Database file path (default: ./salesdesk_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 SalesDesk Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!("Entries:  {} over {} days", count, days);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.sale_entries().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} sale entries", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        db.close().await;
        return Ok(());
    }

    println!();
    println!("Generating entries...");

    let today = Utc::now().date_naive();
    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let sale_date = today - Duration::days((seed as i64) % days);
        let form = generate_form(seed, &sale_date.format("%Y-%m-%d").to_string());
        let submission = form.to_submission(Some(SEEDER))?;

        let entry = match db.sale_entries().insert(&submission.entry).await {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!("Failed to insert entry {}: {}", seed, e);
                continue;
            }
        };
        db.payments().insert_for_entry(&entry.id, &submission.payments).await?;
        if let Some(movement) = submission.inventory {
            db.inventory().insert_for_entry(&entry.id, &movement).await?;
        }

        generated += 1;
        if generated % 50 == 0 {
            println!("  Generated {} entries...", generated);
        }
    }

    println!();
    println!("✓ Generated {} entries in {:?}", generated, start.elapsed());

    println!();
    println!("Saving cash counts...");
    for offset in 0..days {
        let cash_date = today - Duration::days(offset);
        let inputs: Vec<CashLineInput> = DENOMINATIONS
            .iter()
            .enumerate()
            .map(|(idx, denomination)| CashLineInput {
                denomination_centavos: *denomination,
                pieces: ((offset as usize + idx * 3) % 12) as i64,
            })
            .collect();
        let lines = normalize_lines(&inputs)?;
        let saved = db.cash_counts().upsert(cash_date, SEEDER, &lines).await?;
        println!("  {} counted {}", cash_date, saved.header.total_cash());
    }

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Fills an encoder form with deterministic sample data.
fn generate_form(seed: usize, sale_date: &str) -> EncoderForm {
    let package = PackageType::ALL[seed % PackageType::ALL.len()];
    let (mode, mode_type) = PAYMENT_MODES[seed % PAYMENT_MODES.len()];

    let mut form = EncoderForm::new();
    form.update(FormField::Date, sale_date);
    form.update(FormField::PoNumber, format!("PO-{:05}", 10_000 + seed));
    form.update(FormField::MemberName, MEMBER_NAMES[seed % MEMBER_NAMES.len()]);
    form.update(FormField::Username, format!("member{:03}", seed % 97));
    form.update(FormField::MemberType, MEMBER_TYPE_OPTIONS[seed % MEMBER_TYPE_OPTIONS.len()]);
    form.set_new_member(seed % 9 == 0);
    form.update(FormField::PackageType, package.label());

    if package.priced_by_blister_count() {
        form.update(FormField::ToBlister, "yes");
        form.update(FormField::BlisterCount, (1 + seed % 5).to_string());
    } else {
        form.update(FormField::ToBlister, "no");
        form.update(FormField::Quantity, (1 + seed % 3).to_string());
    }

    form.update(
        FormField::Discount,
        DISCOUNT_OPTIONS[seed % DISCOUNT_OPTIONS.len()].to_string(),
    );
    if seed % 11 == 0 {
        form.update(FormField::OneTimeDiscount, "250");
    }

    form.update(FormField::ModeOfPayment, mode);
    form.update(FormField::PaymentModeType, mode_type);
    form.update(FormField::ReferenceNumber, format!("REF{:06}", seed));

    // Every fifth entry carries a second, cash top-up payment
    if seed % 5 == 0 {
        form.update(FormField::ModeOfPayment2, "cash");
        form.update(FormField::Amount2, "500");
    }

    let bottles = package.bottles() * (1 + (seed % 3) as i64);
    if seed % 4 != 0 {
        form.update(FormField::ReleasedBottle, (bottles - bottles / 3).to_string());
        form.update(FormField::ToFollowBottle, (bottles / 3).to_string());
    }
    if package.priced_by_blister_count() {
        form.update(FormField::ReleasedBlister, (1 + seed % 5).to_string());
    }

    form.update(FormField::ReceivedBy, "Front Desk");
    form
}
