//! Entity to model mappers
//!
//! Conversions between domain entities (guild-core) and database rows.
//! - `From<Model> for Entity`: decode rows into domain objects
//! - `*Insert` structs: borrow entity data in column order for binding
//!
//! Timestamps cross this boundary as epoch milliseconds and booleans
//! as `0`/`1` integers.

mod application;
mod contribution;
mod guild;
mod invite;
mod log_entry;
mod member;
mod relation;

pub use application::ApplicationInsert;
pub use contribution::ContributionInsert;
pub use guild::{GuildInsert, GuildUpdate};
pub use invite::InviteInsert;
pub use log_entry::LogEntryInsert;
pub use member::MemberInsert;
pub use relation::RelationInsert;

use chrono::{DateTime, Utc};

pub(crate) fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

/// Out-of-range values decode to the epoch rather than failing the row.
pub(crate) fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

pub(crate) fn opt_from_millis(millis: Option<i64>) -> Option<DateTime<Utc>> {
    millis.map(from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_round_trip() {
        let now = Utc::now();
        let decoded = from_millis(to_millis(now));
        assert_eq!(decoded.timestamp_millis(), now.timestamp_millis());
    }

    #[test]
    fn test_out_of_range_millis_decode_to_epoch() {
        assert_eq!(from_millis(i64::MAX).timestamp_millis(), 0);
    }
}
