//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/spending/{spending_id}', use [format_endpoint].

/// The root route which redirects to the page for adding spending.
pub const ROOT: &str = "/";
/// The page for adding a new spending entry.
pub const NEW_SPENDING_VIEW: &str = "/spending/new";
/// The page for browsing and editing spending entries.
pub const SPENDING_VIEW: &str = "/spending";
/// The fragment containing the form for editing a single spending entry.
pub const EDIT_SPENDING_VIEW: &str = "/spending/edit";
/// The page summarising spending by member.
pub const SUMMARY_VIEW: &str = "/summary";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to ask for confirmation before adding a spending entry.
pub const CONFIRM_SPENDING: &str = "/api/spending/confirm";
/// The route to add (or discard) a confirmed spending entry.
pub const SPENDING_API: &str = "/api/spending";
/// The route to update a spending entry.
pub const PUT_SPENDING: &str = "/api/spending/{spending_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/spending/{spending_id}', '{spending_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.char_indices() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

/// Append `filter` to `endpoint_path` as the `member` query parameter.
pub fn with_member_filter(endpoint_path: &str, filter: &str) -> String {
    match serde_urlencoded::to_string([("member", filter)]) {
        Ok(query) => format!("{endpoint_path}?{query}"),
        Err(error) => {
            tracing::error!("could not encode member filter {filter:?}: {error}");
            endpoint_path.to_owned()
        }
    }
}
