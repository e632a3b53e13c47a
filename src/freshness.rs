//! Delay classification.
//!
//! Pure function of the current time, the generation time and the limit, so it
//! can be exercised without Redis or a real clock.

use crate::error::CheckError;

/// Classify the delay between `now` and `gen_utime` (both Unix seconds).
///
/// Returns the delay on success. A negative delay means the local clock is
/// behind the indexer's and is reported as clock skew rather than clamped.
/// `delay == max_delay` is still healthy.
pub fn evaluate(now: i64, gen_utime: i64, max_delay: i64) -> Result<i64, CheckError> {
    let delay = now.saturating_sub(gen_utime);

    if delay < 0 {
        return Err(CheckError::ClockSkew { delay });
    }

    if delay > max_delay {
        return Err(CheckError::DelayExceeded {
            delay,
            limit: max_delay,
        });
    }

    Ok(delay)
}
