//! Recording, editing and summarising spending by household members.

mod aggregation;
mod browse;
mod create;
mod db;
mod domain;
mod edit;
mod flow;
mod form;
mod summary_page;

pub use browse::get_spending_page;
pub use create::{commit_spending_endpoint, confirm_spending_endpoint, get_new_spending_page};
pub use db::{add_spending, create_spending_table, get_all_spending, get_spending, update_spending};
pub use domain::{ItemName, NewSpending, Spending, SpendingId};
pub use edit::{get_edit_spending_form, update_spending_endpoint};
pub use summary_page::get_summary_page;
