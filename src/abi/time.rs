//! time_point_sec: ISO-8601 seconds, UTC, no zone designator.
//!
//! The wire field is an unsigned 32-bit Unix timestamp, so values past
//! 2106 truncate silently.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{ClientError, ClientResult};

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a chain timestamp to Unix seconds. A fractional-second part is
/// accepted and truncated.
pub fn parse_timestamp(text: &str) -> ClientResult<i64> {
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").map_err(|e| {
        ClientError::TypeMismatch {
            expected: "ISO-8601 timestamp",
            found: format!("{:?} ({})", text, e),
        }
    })?;
    Ok(naive.and_utc().timestamp())
}

/// Format Unix seconds in the chain's second-resolution form.
pub fn format_timestamp(secs: i64) -> ClientResult<String> {
    let ts = DateTime::<Utc>::from_timestamp(secs, 0).ok_or(ClientError::TypeMismatch {
        expected: "representable timestamp",
        found: secs.to_string(),
    })?;
    Ok(ts.format(FORMAT).to_string())
}
