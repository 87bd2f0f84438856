//! Database operations for spending entries.

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::{
    Error,
    spending::{ItemName, NewSpending, Spending, SpendingId},
};

/// Store a new spending entry and return it with its generated ID.
///
/// # Errors
/// Returns [Error::StorageUnavailable] if the entry could not be written.
pub fn add_spending(new_spending: NewSpending, connection: &Connection) -> Result<Spending, Error> {
    connection.execute(
        "INSERT INTO spending (member, item, cost, date) VALUES (?1, ?2, ?3, ?4);",
        params![
            new_spending.member,
            new_spending.item.as_ref(),
            new_spending.cost,
            new_spending.date,
        ],
    )?;

    let id = connection.last_insert_rowid();

    Ok(Spending::from_new(id, new_spending))
}

/// Overwrite every field of the entry with `id`.
///
/// Returns `false` if there is no entry with `id`, in which case nothing is changed.
///
/// # Errors
/// Returns [Error::StorageUnavailable] if the entry could not be written.
pub fn update_spending(
    id: SpendingId,
    new_spending: &NewSpending,
    connection: &Connection,
) -> Result<bool, Error> {
    let rows_affected = connection.execute(
        "UPDATE spending SET member = ?1, item = ?2, cost = ?3, date = ?4 WHERE id = ?5;",
        params![
            new_spending.member,
            new_spending.item.as_ref(),
            new_spending.cost,
            new_spending.date,
            id,
        ],
    )?;

    Ok(rows_affected > 0)
}

/// Retrieve every spending entry.
///
/// The entries are returned in whatever order SQLite produces them.
pub fn get_all_spending(connection: &Connection) -> Result<Vec<Spending>, Error> {
    connection
        .prepare("SELECT id, member, item, cost, date FROM spending;")?
        .query_map([], map_row)?
        .map(|maybe_spending| maybe_spending.map_err(Error::from))
        .collect()
}

/// Retrieve a single spending entry, or `None` if there is no entry with `id`.
pub fn get_spending(id: SpendingId, connection: &Connection) -> Result<Option<Spending>, Error> {
    connection
        .prepare("SELECT id, member, item, cost, date FROM spending WHERE id = :id;")?
        .query_row(&[(":id", &id)], map_row)
        .optional()
        .map_err(Error::from)
}

/// Initialize the spending table.
pub fn create_spending_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS spending (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            member TEXT NOT NULL,
            item TEXT NOT NULL,
            cost REAL NOT NULL,
            date TEXT NOT NULL
        );",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Spending, rusqlite::Error> {
    let raw_item: String = row.get(2)?;

    Ok(Spending {
        id: row.get(0)?,
        member: row.get(1)?,
        item: ItemName::new_unchecked(&raw_item),
        cost: row.get(3)?,
        date: row.get(4)?,
    })
}
