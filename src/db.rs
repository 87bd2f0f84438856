//! Creates the tables for the application's SQLite database.

use rusqlite::Connection;

use crate::{Error, spending::create_spending_table};

/// Create all of the application's tables.
///
/// Safe to call on a database that has already been initialized.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_spending_table(connection)?;

    Ok(())
}
