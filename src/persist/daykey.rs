//! Calendar-day key scheme and the rollover predicate.
//!
//! One key per calendar day, stable for that day, plus a well-known lifetime
//! aggregate key that is merged into and never deleted. The rollover rule is
//! a single pure predicate so load and save cannot drift apart.

use chrono::NaiveDate;

/// Prefix shared by every key this crate writes.
pub const DAY_KEY_PREFIX: &str = "scores/";

/// Key of the lifetime aggregate. Never deleted, merged into, not replaced.
pub const LIFETIME_KEY: &str = "scores/all-time";

/// Key for a given calendar day.
#[must_use]
pub fn day_key(date: NaiveDate) -> String {
    format!("{DAY_KEY_PREFIX}{}", date.format("%Y-%m-%d"))
}

/// Parse a day key back into its date.
///
/// Non-day keys, including [`LIFETIME_KEY`], parse to `None`.
#[must_use]
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    let date = key.strip_prefix(DAY_KEY_PREFIX)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Whether `today` falls on a different calendar day than `stored`.
///
/// Used identically at load and save time: a differing day clears round
/// stats while keeping player identities.
#[must_use]
pub fn is_new_day(stored: NaiveDate, today: NaiveDate) -> bool {
    stored != today
}
