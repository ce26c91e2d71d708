use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Duration, OffsetDateTime};

use ledgerlight::{
    Category, NewBudget, NewTransaction, YearMonth, create_transaction, initialize_db,
    upsert_budget,
};

/// A utility for creating a test database for the REST API server of ledgerlight.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let today = OffsetDateTime::now_utc().date();

    println!("Creating test transactions...");
    let mut transaction_count = 0;

    // Roughly six months of history so every chart has something to show.
    for days_ago in (0..180).step_by(3) {
        let date = today - Duration::days(days_ago);
        let (amount, description, category) = sample_transaction(days_ago, date);

        create_transaction(
            NewTransaction::new(amount, date, description, category)?,
            &conn,
        )?;
        transaction_count += 1;
    }

    println!("Creating test budgets...");
    let this_month = YearMonth::from(today);
    let budgets = [
        (Category::Food, 400.0),
        (Category::Rent, 1800.0),
        (Category::Transportation, 120.0),
        (Category::Entertainment, 80.0),
    ];

    for (category, amount) in budgets {
        upsert_budget(NewBudget::new(category, amount, this_month)?, &conn)?;
    }

    println!(
        "Success! Created {transaction_count} transactions and {} budgets.",
        budgets.len()
    );

    Ok(())
}

fn sample_transaction(days_ago: i64, date: Date) -> (f64, &'static str, Category) {
    if date.day() <= 3 && days_ago % 2 == 0 {
        return (1800.0, "Rent", Category::Rent);
    }

    match days_ago % 5 {
        0 => (85.40, "Weekly groceries", Category::Food),
        1 => (23.00, "Bus pass top up", Category::Transportation),
        2 => (15.99, "Streaming subscription", Category::Entertainment),
        3 => (142.75, "Power bill", Category::Utilities),
        _ => (59.90, "New shoes", Category::Shopping),
    }
}
