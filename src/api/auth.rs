use crate::db::{CatalogRepository, Database};
use crate::errors::Error;
use axum::http::{header, HeaderMap};

/// Resolves the request's bearer credential to a user id through the
/// session store. Runs before any task is created; a failure here means
/// the submission never happened.
///
/// # Errors
/// Fails with `Error::Auth` for missing or unknown credentials
pub fn authenticate(database: &Database, headers: &HeaderMap) -> Result<String, Error> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| Error::Auth("missing bearer credential".to_string()))?;

    let mut conn = database.get_conn();
    CatalogRepository::new(&mut conn)
        .user_for_session(token)?
        .ok_or_else(|| Error::Auth("invalid session token".to_string()))
}
