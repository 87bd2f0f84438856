//! The steps a user goes through to add or edit a spending entry.
//!
//! Each request starts from the state encoded in the page the user submitted
//! (the confirmed values are sent back as hidden inputs, the ID being edited
//! is part of the update URL), so the server keeps no interaction state
//! between requests.

use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    Error,
    spending::{NewSpending, Spending, SpendingId, add_spending, get_spending, update_spending},
};

/// The user's answer to "Are you sure you want to add this entry?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Yes,
    No,
}

/// Where the user is in adding or editing an entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// Nothing is in progress.
    Idle,
    /// The user has filled in the add form and has been asked to confirm it.
    Confirming(NewSpending),
    /// An existing entry has been loaded into the edit form.
    Editing(SpendingId),
}

/// What happened to the stored spending as the result of a step.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The confirmed entry was stored.
    Added(Spending),
    /// The user declined to add the entry, nothing was stored.
    Discarded,
    /// An entry was loaded for editing.
    Loaded(Spending),
    /// The entry being edited was overwritten.
    Updated(Spending),
    /// No entry has the requested ID.
    NotFound(SpendingId),
}

impl Interaction {
    /// Ask the user to confirm `new_spending` before it is stored.
    ///
    /// # Errors
    /// Returns [Error::InvalidTransition] if an entry is being edited.
    pub fn review(self, new_spending: NewSpending) -> Result<Interaction, Error> {
        match self {
            Interaction::Idle | Interaction::Confirming(_) => {
                Ok(Interaction::Confirming(new_spending))
            }
            Interaction::Editing(_) => Err(Error::InvalidTransition),
        }
    }

    /// Store the entry awaiting confirmation if `decision` is [Decision::Yes],
    /// otherwise drop it.
    ///
    /// # Errors
    /// Returns [Error::InvalidTransition] if no entry is awaiting confirmation,
    /// or an error if the entry could not be stored.
    pub fn decide(
        self,
        decision: Decision,
        connection: &Connection,
    ) -> Result<(Interaction, Outcome), Error> {
        let Interaction::Confirming(new_spending) = self else {
            return Err(Error::InvalidTransition);
        };

        match decision {
            Decision::Yes => {
                let spending = add_spending(new_spending, connection)?;
                Ok((Interaction::Idle, Outcome::Added(spending)))
            }
            Decision::No => Ok((Interaction::Idle, Outcome::Discarded)),
        }
    }

    /// Load the entry with `id` so that it can be edited.
    ///
    /// A missing entry is reported as [Outcome::NotFound] and leaves nothing in progress.
    pub fn load(
        self,
        id: SpendingId,
        connection: &Connection,
    ) -> Result<(Interaction, Outcome), Error> {
        if let Interaction::Confirming(_) = self {
            return Err(Error::InvalidTransition);
        }

        match get_spending(id, connection)? {
            Some(spending) => Ok((Interaction::Editing(id), Outcome::Loaded(spending))),
            None => Ok((Interaction::Idle, Outcome::NotFound(id))),
        }
    }

    /// Overwrite the entry being edited with `new_spending`.
    ///
    /// # Errors
    /// Returns [Error::InvalidTransition] if no entry is being edited, or an
    /// error if the entry could not be written.
    pub fn submit(
        self,
        new_spending: NewSpending,
        connection: &Connection,
    ) -> Result<(Interaction, Outcome), Error> {
        let Interaction::Editing(id) = self else {
            return Err(Error::InvalidTransition);
        };

        if update_spending(id, &new_spending, connection)? {
            Ok((
                Interaction::Idle,
                Outcome::Updated(Spending::from_new(id, new_spending)),
            ))
        } else {
            Ok((Interaction::Idle, Outcome::NotFound(id)))
        }
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        member::Member,
        spending::{ItemName, NewSpending, Spending, get_all_spending, get_spending},
    };

    use super::{Decision, Interaction, Outcome};

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    fn feed(cost: f64) -> NewSpending {
        NewSpending::new(
            Member::George,
            ItemName::new_unchecked("Feed"),
            cost,
            date!(2024 - 01 - 01),
        )
        .unwrap()
    }

    #[test]
    fn review_asks_for_confirmation() {
        let state = Interaction::Idle.review(feed(250.0));

        assert_eq!(state, Ok(Interaction::Confirming(feed(250.0))));
    }

    #[test]
    fn review_while_editing_is_invalid() {
        let state = Interaction::Editing(1).review(feed(250.0));

        assert_eq!(state, Err(Error::InvalidTransition));
    }

    #[test]
    fn confirming_yes_stores_entry() {
        let connection = get_test_connection();

        let (state, outcome) = Interaction::Confirming(feed(250.0))
            .decide(Decision::Yes, &connection)
            .expect("Could not add spending");

        assert_eq!(state, Interaction::Idle);
        let Outcome::Added(spending) = outcome else {
            panic!("want Outcome::Added, got {outcome:?}");
        };
        assert_eq!(
            get_all_spending(&connection).unwrap(),
            [Spending::from_new(spending.id, feed(250.0))]
        );
    }

    #[test]
    fn confirming_no_stores_nothing() {
        let connection = get_test_connection();

        let (state, outcome) = Interaction::Confirming(feed(250.0))
            .decide(Decision::No, &connection)
            .unwrap();

        assert_eq!(state, Interaction::Idle);
        assert_eq!(outcome, Outcome::Discarded);
        assert!(get_all_spending(&connection).unwrap().is_empty());
    }

    #[test]
    fn deciding_without_confirmation_is_invalid() {
        let connection = get_test_connection();

        let got = Interaction::Idle.decide(Decision::Yes, &connection);

        assert_eq!(got, Err(Error::InvalidTransition));
        assert!(get_all_spending(&connection).unwrap().is_empty());
    }

    #[test]
    fn load_existing_entry_starts_editing() {
        let connection = get_test_connection();
        let (_, outcome) = Interaction::Confirming(feed(250.0))
            .decide(Decision::Yes, &connection)
            .unwrap();
        let Outcome::Added(added) = outcome else {
            panic!("want Outcome::Added, got {outcome:?}");
        };

        let got = Interaction::Idle.load(added.id, &connection);

        assert_eq!(
            got,
            Ok((Interaction::Editing(added.id), Outcome::Loaded(added)))
        );
    }

    #[test]
    fn load_missing_entry_reports_not_found() {
        let connection = get_test_connection();

        let got = Interaction::Idle.load(7, &connection);

        assert_eq!(got, Ok((Interaction::Idle, Outcome::NotFound(7))));
    }

    #[test]
    fn submit_overwrites_entry_being_edited() {
        let connection = get_test_connection();
        let (_, outcome) = Interaction::Confirming(feed(250.0))
            .decide(Decision::Yes, &connection)
            .unwrap();
        let Outcome::Added(added) = outcome else {
            panic!("want Outcome::Added, got {outcome:?}");
        };

        let (state, outcome) = Interaction::Editing(added.id)
            .submit(feed(300.0), &connection)
            .unwrap();

        assert_eq!(state, Interaction::Idle);
        let want = Spending::from_new(added.id, feed(300.0));
        assert_eq!(outcome, Outcome::Updated(want.clone()));
        assert_eq!(get_spending(added.id, &connection), Ok(Some(want)));
    }

    #[test]
    fn submit_for_missing_entry_reports_not_found() {
        let connection = get_test_connection();

        let got = Interaction::Editing(99).submit(feed(300.0), &connection);

        assert_eq!(got, Ok((Interaction::Idle, Outcome::NotFound(99))));
    }

    #[test]
    fn submit_without_loading_is_invalid() {
        let connection = get_test_connection();

        let got = Interaction::Idle.submit(feed(300.0), &connection);

        assert_eq!(got, Err(Error::InvalidTransition));
    }

    #[test]
    fn each_step_is_only_allowed_from_its_states() {
        let connection = get_test_connection();
        let states = [
            Interaction::Idle,
            Interaction::Confirming(feed(250.0)),
            Interaction::Editing(99),
        ];

        for state in states {
            let review = state.clone().review(feed(1.0));
            let decide = state.clone().decide(Decision::No, &connection);
            let load = state.clone().load(99, &connection);
            let submit = state.clone().submit(feed(1.0), &connection);

            let allowed = [
                review.is_ok(),
                decide.is_ok(),
                load.is_ok(),
                submit.is_ok(),
            ];
            let want = match state {
                Interaction::Idle => [true, false, true, false],
                Interaction::Confirming(_) => [true, true, false, false],
                Interaction::Editing(_) => [false, false, true, true],
            };
            assert_eq!(allowed, want, "steps allowed from {state:?}");

            for rejected in [review.err(), decide.err(), load.err(), submit.err()]
                .into_iter()
                .flatten()
            {
                assert_eq!(rejected, Error::InvalidTransition);
            }
        }

        assert!(get_all_spending(&connection).unwrap().is_empty());
    }
}
