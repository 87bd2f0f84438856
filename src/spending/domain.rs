//! Core types for spending entries.

use std::{fmt::Display, str::FromStr};

use serde::Deserialize;
use time::Date;

use crate::{Error, html::format_rupees, member::Member};

/// The database ID of a spending entry.
pub type SpendingId = i64;

/// The largest cost, in rupees, accepted for a single entry.
pub const MAX_COST: f64 = 1_000_000_000_000.0;

/// What the money was spent on, e.g. 'Feed'.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemName(String);

impl ItemName {
    /// Create an item name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyItem] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyItem)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create an item name without validation.
    ///
    /// The caller should ensure that the string is not empty, e.g. because it
    /// was read back from the database.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ItemName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemName::new(s)
    }
}

impl Display for ItemName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The values for a spending entry that has not been assigned an ID.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSpending {
    /// Who spent the money.
    pub member: Member,
    /// What the money was spent on.
    pub item: ItemName,
    /// How much was spent, in rupees. Between zero and [MAX_COST].
    pub cost: f64,
    /// When the money was spent.
    pub date: Date,
}

impl NewSpending {
    /// Create a spending entry that is ready to be stored.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidCost] if `cost` is negative, NaN or more than [MAX_COST].
    pub fn new(member: Member, item: ItemName, cost: f64, date: Date) -> Result<Self, Error> {
        if !(0.0..=MAX_COST).contains(&cost) {
            return Err(Error::InvalidCost(cost));
        }

        Ok(Self {
            member,
            item,
            cost,
            date,
        })
    }
}

/// Reads like "George spent ₹250 on Feed on 2024-01-01".
impl Display for NewSpending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} spent {} on {} on {}",
            self.member,
            format_rupees(self.cost),
            self.item,
            self.date
        )
    }
}

/// A spending entry stored in the database.
#[derive(Debug, Clone, PartialEq)]
pub struct Spending {
    /// The ID assigned by the database, stable across updates.
    pub id: SpendingId,
    /// Who spent the money.
    pub member: Member,
    /// What the money was spent on.
    pub item: ItemName,
    /// How much was spent, in rupees.
    pub cost: f64,
    /// When the money was spent.
    pub date: Date,
}

impl Spending {
    /// Attach `id` to the values in `new_spending`.
    pub fn from_new(id: SpendingId, new_spending: NewSpending) -> Self {
        Self {
            id,
            member: new_spending.member,
            item: new_spending.item,
            cost: new_spending.cost,
            date: new_spending.date,
        }
    }

    /// The entry's values without its ID.
    pub fn to_new(&self) -> NewSpending {
        NewSpending {
            member: self.member,
            item: self.item.clone(),
            cost: self.cost,
            date: self.date,
        }
    }
}

/// The fields of the add and edit forms, as submitted by the browser.
#[derive(Debug, Clone, Deserialize)]
pub struct SpendingForm {
    pub member: String,
    pub item: String,
    pub cost: f64,
    pub date: Date,
}

impl TryFrom<SpendingForm> for NewSpending {
    type Error = Error;

    fn try_from(form: SpendingForm) -> Result<Self, Self::Error> {
        let member = form.member.parse()?;
        let item = ItemName::new(&form.item)?;

        NewSpending::new(member, item, form.cost, form.date)
    }
}
