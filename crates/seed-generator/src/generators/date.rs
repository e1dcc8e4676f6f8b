//! Date/time value generator.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use seed_core::{FieldConfig, SeedValue};

use super::{Hint, ValueGenerator};
use crate::error::ConfigError;

const DAYS_PER_YEAR: i64 = 365;

fn years(n: i64) -> Duration {
    Duration::days(n * DAYS_PER_YEAR)
}

/// Random timestamp in `[start, end]` at second precision.
pub fn generate_timestamp_range<R: Rng>(
    rng: &mut R,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DateTime<Utc> {
    let start_ts = start.timestamp();
    let end_ts = end.timestamp();

    if start_ts >= end_ts {
        return start;
    }

    let random_ts = rng.random_range(start_ts..=end_ts);
    DateTime::from_timestamp(random_ts, 0).unwrap_or(start)
}

/// Date generator.
///
/// | Field name contains | Window |
/// |---------------------|--------|
/// | `birth`, `dob`, `birthday` | 80 to 18 years ago |
/// | `created`, `updated`, `modified`, `published`, `joined`, ... | last 2 years |
/// | `expires`, `due`, `deadline`, `scheduled`, ... | next year |
/// | anything else | 5 years ago to 1 year ahead |
#[derive(Debug, Clone, Copy, Default)]
pub struct DateGenerator;

impl DateGenerator {
    fn window(hint: &Hint<'_>, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        if hint.has_word(&["birth", "dob", "birthday", "birthdate", "born"]) {
            (now - years(80), now - years(18))
        } else if hint.has_word(&[
            "created",
            "updated",
            "modified",
            "published",
            "joined",
            "registered",
            "deleted",
            "last",
            "seen",
        ]) {
            (now - years(2), now)
        } else if hint.has_word(&[
            "expires", "expiry", "expiration", "due", "deadline", "scheduled", "until", "ends",
        ]) {
            (now + Duration::minutes(1), now + years(1))
        } else {
            (now - years(5), now + years(1))
        }
    }
}

impl ValueGenerator for DateGenerator {
    fn generate<R: Rng>(
        &self,
        rng: &mut R,
        hint: &Hint<'_>,
        _config: &FieldConfig,
    ) -> Result<SeedValue, ConfigError> {
        let now = Utc::now();
        let (start, end) = Self::window(hint, now);
        Ok(SeedValue::DateTime(generate_timestamp_range(rng, start, end)))
    }
}
