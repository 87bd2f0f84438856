//! A small web app for recording what each member of the household spends.
//!
//! Spending is stored in a single SQLite table and is managed through three
//! server-rendered views: one for adding entries, one for browsing and
//! editing them, and one for summarising totals by member.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod db;
mod endpoints;
mod error_page;
mod html;
mod logging;
mod member;
mod navigation;
mod routing;
mod spending;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use member::Member;
pub use routing::build_router;
pub use spending::{ItemName, NewSpending, Spending, SpendingId, add_spending};
pub use timezone::get_local_offset;

use crate::{alert::Alert, error_page::ErrorPage};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string, or a string of only whitespace, was used as the item
    /// of a spending entry.
    #[error("Item cannot be empty")]
    EmptyItem,

    /// The cost of a spending entry was negative, too large or not a number.
    #[error("Cost must be between ₹0 and ₹1,000,000,000,000, got {0}")]
    InvalidCost(f64),

    /// The name did not match any of the household members.
    #[error("\"{0}\" is not a household member")]
    InvalidMember(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a spending entry that does not exist.
    #[error("no entry found with ID {0}")]
    UpdateMissingSpending(spending::SpendingId),

    /// The database could not be read from or written to.
    ///
    /// The inner error should only be logged for debugging on the server.
    #[error("the spending database is unavailable: {0}")]
    StorageUnavailable(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// A step of an add or edit interaction was attempted out of order, e.g.
    /// committing an entry that was never confirmed.
    #[error("that action is not available right now")]
    InvalidTransition,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::StorageUnavailable(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => ErrorPage::not_found().into_response(),
            Error::InvalidTimezoneError(timezone) => ErrorPage::internal(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            )
            .into_response(),
            Error::StorageUnavailable(_) => ErrorPage::internal(
                "Spending Data Unavailable",
                "The spending database could not be reached. Try again later or check the server logs.",
            )
            .into_response(),
            Error::DatabaseLockError => ErrorPage::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorPage::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::EmptyItem | Error::InvalidCost(_) | Error::InvalidMember(_) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid spending entry".to_owned(),
                    details: self.to_string(),
                },
            )
                .into_response(),
            Error::UpdateMissingSpending(id) => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update spending".to_owned(),
                    details: format!("No entry found with ID {id}"),
                },
            )
                .into_response(),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::ErrorSimple {
                    message: "The spending entry could not be found.".to_owned(),
                },
            )
                .into_response(),
            Error::InvalidTransition => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Nothing to confirm".to_owned(),
                    details: "Fill in the form and press confirm before adding an entry."
                        .to_owned(),
                },
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            )
                .into_response(),
            Error::StorageUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Spending data unavailable".to_owned(),
                    details: "The change was not saved. Try again or check the server logs."
                        .to_owned(),
                },
            )
                .into_response(),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details: "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                },
            )
                .into_response(),
        }
    }
}
