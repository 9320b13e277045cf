//! Host timezone service: which zones exist and what the wall clock reads in each.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;
use tracing::debug;

/// Zones offered when the host cannot enumerate its own.
pub const FALLBACK_ZONES: [&str; 6] = [
    "Asia/Bangkok",
    "Asia/Tokyo",
    "Europe/London",
    "America/New_York",
    "America/Los_Angeles",
    "Australia/Sydney",
];

/// Hour reported for a zone that cannot be resolved.
const UNKNOWN_ZONE_HOUR: u32 = 12;

/// Source of timezone identifiers and local wall-clock times
pub trait ZoneDatabase: Send + Sync {
    /// Every zone id the host knows, or `None` when enumeration is unsupported.
    fn zone_ids(&self) -> Option<Vec<String>>;

    /// Wall-clock time in `zone` at instant `at`, or `None` for an unknown zone.
    fn local_time(&self, zone: &str, at: DateTime<Utc>) -> Option<NaiveDateTime>;
}

/// IANA database compiled in through `chrono-tz`
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoTzDatabase;

impl ZoneDatabase for ChronoTzDatabase {
    fn zone_ids(&self) -> Option<Vec<String>> {
        Some(
            chrono_tz::TZ_VARIANTS
                .iter()
                .map(|tz| tz.name().to_string())
                .collect(),
        )
    }

    fn local_time(&self, zone: &str, at: DateTime<Utc>) -> Option<NaiveDateTime> {
        let tz: Tz = zone.parse().ok()?;
        Some(at.with_timezone(&tz).naive_local())
    }
}

/// Zone ids to offer, falling back to a short fixed list.
pub fn available_zones(db: &dyn ZoneDatabase) -> Vec<String> {
    match db.zone_ids() {
        Some(ids) if !ids.is_empty() => ids,
        _ => {
            debug!("zone enumeration unavailable, using fallback list");
            FALLBACK_ZONES.iter().map(|zone| zone.to_string()).collect()
        }
    }
}

/// Hours the destination clock is ahead of the origin clock at `at`.
///
/// Half hours round toward positive infinity, so +3:30 becomes 4 and -3:30
/// becomes -3. Unknown zones yield 0.
pub fn time_difference(db: &dyn ZoneDatabase, from: &str, to: &str, at: DateTime<Utc>) -> i32 {
    let (Some(origin), Some(destination)) = (db.local_time(from, at), db.local_time(to, at))
    else {
        debug!(from, to, "zone lookup failed, assuming no shift");
        return 0;
    };

    let minutes = (destination - origin).num_minutes();
    (minutes as f64 / 60.0 + 0.5).floor() as i32
}

/// Current hour (0-23) in `zone`.
pub fn local_hour(db: &dyn ZoneDatabase, zone: &str, at: DateTime<Utc>) -> u32 {
    db.local_time(zone, at)
        .map(|time| time.hour())
        .unwrap_or(UNKNOWN_ZONE_HOUR)
}
