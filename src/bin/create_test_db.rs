use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use spending_tracker::{ItemName, Member, NewSpending, add_spending, initialize_db};

/// A utility for creating a spending database filled with sample entries.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const SAMPLE_SPENDING: [(Member, &str, f64); 8] = [
    (Member::George, "Feed", 250.0),
    (Member::Lourdumary, "Vaccine", 120.5),
    (Member::Poondi, "Grit", 40.0),
    (Member::George, "Water trough", 899.0),
    (Member::Poondi, "Layer pellets", 310.0),
    (Member::Lourdumary, "Straw", 75.0),
    (Member::George, "Feed", 255.0),
    (Member::Poondi, "Heat lamp", 1450.0),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'spending.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let connection = Connection::open(output_path)?;

    initialize_db(&connection)?;

    println!("Adding {} spending entries...", SAMPLE_SPENDING.len());

    let today = OffsetDateTime::now_utc().date();

    for (days_ago, (member, item, cost)) in SAMPLE_SPENDING.into_iter().enumerate() {
        let date = today - Duration::days(days_ago as i64 * 3);
        let new_spending = NewSpending::new(member, ItemName::new(item)?, cost, date)?;

        add_spending(new_spending, &connection)?;
    }

    println!("Success!");

    Ok(())
}
