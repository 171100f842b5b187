//! Exponential backoff arithmetic.
//!
//! The schedule is `base, 2·base, 4·base, 8·base, …` measured from the
//! last attempt. A row that has never been attempted by the worker
//! (`retry_count = 0`) carries no extra wait beyond the tick itself.

use chrono::{DateTime, Duration, Utc};

/// Earliest moment the next attempt is permitted:
/// `last_attempted_at + base · 2^retry_count`.
///
/// Saturates instead of overflowing for absurd retry counts.
pub fn next_attempt_at(
    last_attempted_at: DateTime<Utc>,
    base_interval_sec: u32,
    retry_count: u32,
) -> DateTime<Utc> {
    let multiplier = 1u64.checked_shl(retry_count).unwrap_or(u64::MAX);
    let wait_secs = u64::from(base_interval_sec)
        .saturating_mul(multiplier)
        .min(i64::MAX as u64) as i64;
    let wait = Duration::try_seconds(wait_secs).unwrap_or(Duration::MAX);
    last_attempted_at
        .checked_add_signed(wait)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
