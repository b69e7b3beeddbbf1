//! Query helpers that turn common lookup patterns into `TournamentError`s.
//!
//! - Fetching a required record (NotFound if missing)
//! - Ensuring a write touched at least one row (NotFound otherwise)
//!
//! # Usage
//! ```ignore
//! let team = require_record(teams::fetch_team(pool, id, scope).await, "Team not found")?;
//! ```

use crate::error::{TournamentError, TournamentResult};

/// Unwrap an optional database result, returning NotFound if None.
pub fn require_record<T>(
    result: Result<Option<T>, sqlx::Error>,
    not_found_message: &str,
) -> TournamentResult<T> {
    match result {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(TournamentError::not_found(not_found_message)),
        Err(e) => Err(e.into()),
    }
}

/// Treat a write that affected no rows as NotFound.
pub fn require_affected(
    result: Result<u64, sqlx::Error>,
    not_found_message: &str,
) -> TournamentResult<()> {
    match result {
        Ok(0) => Err(TournamentError::not_found(not_found_message)),
        Ok(_) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_record_is_not_found() {
        let result: Result<Option<i32>, sqlx::Error> = Ok(None);
        match require_record(result, "Team not found") {
            Err(TournamentError::NotFound(msg)) => assert_eq!(msg, "Team not found"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn present_record_is_returned() {
        let result: Result<Option<i32>, sqlx::Error> = Ok(Some(7));
        assert_eq!(require_record(result, "x").unwrap(), 7);
    }

    #[test]
    fn zero_rows_is_not_found() {
        assert!(matches!(require_affected(Ok(0), "gone"), Err(TournamentError::NotFound(_))));
        assert!(require_affected(Ok(2), "gone").is_ok());
    }
}
