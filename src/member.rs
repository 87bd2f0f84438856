//! The household members that spending can be attributed to.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::Deserialize;

use crate::Error;

/// A member of the household.
///
/// The set of members is fixed, there is no way to add or remove members at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum Member {
    /// George.
    George,
    /// Lourdumary.
    Lourdumary,
    /// Poondi.
    Poondi,
}

impl Member {
    /// Every member, in the order they are listed in forms and summaries.
    pub const ALL: [Member; 3] = [Member::George, Member::Lourdumary, Member::Poondi];

    /// The member's name as it is displayed and stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Member::George => "George",
            Member::Lourdumary => "Lourdumary",
            Member::Poondi => "Poondi",
        }
    }
}

impl Display for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Member {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Member::ALL
            .into_iter()
            .find(|member| member.as_str() == s.trim())
            .ok_or_else(|| Error::InvalidMember(s.to_owned()))
    }
}

impl TryFrom<String> for Member {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl ToSql for Member {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Member {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let name = value.as_str()?;

        name.parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// Which members to include when listing or summarising spending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum MemberFilter {
    /// Include every member.
    #[default]
    All,
    /// Include a single member.
    Only(Member),
}

impl MemberFilter {
    const ALL_LABEL: &'static str = "All";

    /// Every option, in the order they are listed in the filter dropdowns.
    pub fn options() -> impl Iterator<Item = MemberFilter> {
        std::iter::once(MemberFilter::All).chain(Member::ALL.into_iter().map(MemberFilter::Only))
    }

    /// Whether spending by `member` passes the filter.
    pub fn matches(&self, member: Member) -> bool {
        match self {
            MemberFilter::All => true,
            MemberFilter::Only(only) => *only == member,
        }
    }

    /// The value used for the filter in query strings and forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberFilter::All => Self::ALL_LABEL,
            MemberFilter::Only(member) => member.as_str(),
        }
    }
}

impl Display for MemberFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() || s == Self::ALL_LABEL {
            Ok(MemberFilter::All)
        } else {
            s.parse().map(MemberFilter::Only)
        }
    }
}

impl TryFrom<String> for MemberFilter {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
