//! Grouping spending by member and adding up the costs.

use std::collections::BTreeMap;

use crate::{
    member::{Member, MemberFilter},
    spending::Spending,
};

/// The total cost of spending attributed to one member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemberTotal {
    pub member: Member,
    pub total: f64,
}

/// Per-member totals and the grand total for a set of spending entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpendingSummary {
    /// One total for each member that has at least one entry, in the order of [Member::ALL].
    pub totals: Vec<MemberTotal>,
    /// The sum of every entry's cost.
    pub grand_total: f64,
}

/// Keep only the entries that pass `filter`.
pub fn filter_by_member(spending: Vec<Spending>, filter: MemberFilter) -> Vec<Spending> {
    spending
        .into_iter()
        .filter(|spending| filter.matches(spending.member))
        .collect()
}

/// Group `spending` by member, summing the cost for each member.
pub fn summarize(spending: &[Spending]) -> SpendingSummary {
    let mut totals: BTreeMap<Member, f64> = BTreeMap::new();

    for entry in spending {
        *totals.entry(entry.member).or_insert(0.0) += entry.cost;
    }

    SpendingSummary {
        totals: totals
            .into_iter()
            .map(|(member, total)| MemberTotal { member, total })
            .collect(),
        grand_total: spending.iter().map(|entry| entry.cost).sum(),
    }
}
