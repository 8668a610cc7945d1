// demos/aberporth.rs
//
// Fixed walk-through of the three tasks: yearly record editing, then archiving.
// Run with RUST_LOG=info to see the confirmations and year listings.
use rainfall_archive::{ArchiveTable, Loader, RainfallError};
use std::env;

const CITY: &str = "Aberporth";
const STATION_FILE: &str = "data/aberporth.csv";

fn main() -> Result<(), RainfallError> {
    env_logger::init();

    let loader = Loader::builder().path(STATION_FILE).build();

    // Task 1
    let mut record = loader.load_yearly()?;
    println!("{}", record.display_months(1941)?);
    println!(
        "Average rainfall between 1 and 12: {}",
        record.average(1941, 1, 12)?
    );

    // Task 2
    println!("Rainfall for 1941 month 12: {:?}", record.rainfall(1941, 12)?);
    record.delete(1941, 12)?;
    record.insert(1941, 12, 30.5)?;
    record.insert_quarter(1941, "winter", &[0.0, 0.1, 0.2])?;
    println!("{}", record.display_months(1941)?);

    // Task 3
    let database = env::temp_dir().join("rainfall_archive_database.csv");
    let table = ArchiveTable::new(&database);
    if table.exists() {
        // Start from a fresh table so the demo can be run repeatedly.
        std::fs::remove_file(&database)
            .map_err(|e| rainfall_archive::ArchiveError::Io(database.clone(), e))?;
    }
    let inserted = loader.archive_into(CITY, &table)?;
    println!("Archived {} years into {}", inserted, database.display());

    let removed = table.delete(CITY, 1941)?;
    println!("Deleted {} 1941: {}", CITY, removed);
    println!("{:?}", table.sma(CITY, 1941, 1942, 2)?);

    Ok(())
}
