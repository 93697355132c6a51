//! Flight time handling.
//!
//! The reservation service writes every timestamp as
//! `"yyyy MMM dd HH:mm ZONE"`, e.g. `"2016 May 10 21:30 GMT"`. This module
//! turns that text into a single value type, [`FlightTime`], which carries
//! the absolute instant together with the zone it was written in. All date
//! arithmetic the planner needs (day buckets, next-day spill, layover gaps)
//! is defined on that type.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Days, Duration, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone,
    Timelike, Utc,
};
use serde::{Serialize, Serializer};

/// Layout of the date and time portion, without the trailing zone name.
const DATE_TIME_FORMAT: &str = "%Y %b %d %H:%M";

/// Error returned when a timestamp cannot be parsed or shifted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid flight time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: impl Into<String>, reason: &'static str) -> Self {
        Self {
            input: input.into(),
            reason,
        }
    }

    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A named fixed-offset time zone.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Zone {
    name: &'static str,
    offset_secs: i32,
}

const HOUR: i32 = 3600;

/// Zone names accepted by [`FlightTime::parse`].
const KNOWN_ZONES: &[Zone] = &[
    Zone::GMT,
    Zone::new("UTC", 0),
    Zone::new("EST", -5 * HOUR),
    Zone::new("EDT", -4 * HOUR),
    Zone::new("CST", -6 * HOUR),
    Zone::new("CDT", -5 * HOUR),
    Zone::new("MST", -7 * HOUR),
    Zone::new("MDT", -6 * HOUR),
    Zone::new("PST", -8 * HOUR),
    Zone::new("PDT", -7 * HOUR),
];

impl Zone {
    /// Greenwich Mean Time, the reservation service's canonical zone.
    pub const GMT: Zone = Zone::new("GMT", 0);

    const fn new(name: &'static str, offset_secs: i32) -> Self {
        Self { name, offset_secs }
    }

    /// Look up a zone by name (case-sensitive).
    pub fn parse(name: &str) -> Result<Self, TimeError> {
        KNOWN_ZONES
            .iter()
            .find(|z| z.name == name)
            .copied()
            .ok_or_else(|| TimeError::new(name, "unknown time zone"))
    }

    /// The zone's abbreviation, e.g. `"EST"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The zone's offset from UTC.
    pub fn offset(&self) -> FixedOffset {
        // Table entries are all well inside chrono's +/-24h bound.
        FixedOffset::east_opt(self.offset_secs).unwrap_or_else(|| Utc.fix())
    }
}

impl Default for Zone {
    fn default() -> Self {
        Zone::GMT
    }
}

impl fmt::Debug for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zone({})", self.name)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for Zone {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Zone::parse(s)
    }
}

/// The calendar-day key used to request a day's flights from the data source.
///
/// Displays as `yyyy_MM_dd`, the format the reservation service expects.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayBucket(NaiveDate);

impl DayBucket {
    /// Wrap a calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Debug for DayBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DayBucket({self})")
    }
}

impl fmt::Display for DayBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}_{:02}_{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

/// An absolute flight timestamp plus the zone it was written in.
///
/// Constructed only through the strict [`FlightTime::parse`] (or from an
/// instant that already exists); there is no fallback format.
///
/// # Examples
///
/// ```
/// use flight_search::domain::{FlightTime, Zone};
///
/// let t = FlightTime::parse("2016 May 10 17:30 EST").unwrap();
/// assert_eq!(t.to_string(), "2016 May 10 17:30 EST");
///
/// // 17:30 EST is 22:30 GMT, past a 21:00 cutoff.
/// assert!(t.spills_to_next_day(21, Zone::GMT));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlightTime {
    instant: DateTime<Utc>,
    zone: Zone,
}

impl FlightTime {
    /// Create a time from an instant and the zone to present it in.
    pub fn new(instant: DateTime<Utc>, zone: Zone) -> Self {
        Self { instant, zone }
    }

    /// Parse `"yyyy MMM dd HH:mm ZONE"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flight_search::domain::FlightTime;
    ///
    /// assert!(FlightTime::parse("2016 May 10 00:34 GMT").is_ok());
    /// assert!(FlightTime::parse("2016 Dec 31 23:59 PST").is_ok());
    ///
    /// assert!(FlightTime::parse("2016-05-10 00:34 GMT").is_err());
    /// assert!(FlightTime::parse("2016 May 10 00:34").is_err());
    /// assert!(FlightTime::parse("2016 May 10 24:00 GMT").is_err());
    /// assert!(FlightTime::parse("2016 May 10 00:34 XYZ").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let (date_time, zone_name) = s
            .rsplit_once(' ')
            .ok_or_else(|| TimeError::new(s, "expected a zone name after the time"))?;

        let zone = Zone::parse(zone_name).map_err(|_| TimeError::new(s, "unknown time zone"))?;

        let local = NaiveDateTime::parse_from_str(date_time, DATE_TIME_FORMAT)
            .map_err(|_| TimeError::new(s, "expected yyyy MMM dd HH:mm"))?;

        let zoned = zone
            .offset()
            .from_local_datetime(&local)
            .single()
            .ok_or_else(|| TimeError::new(s, "time does not exist in zone"))?;

        let time = Self {
            instant: zoned.with_timezone(&Utc),
            zone,
        };

        // chrono tolerates extra spaces, unpadded fields and any month case.
        // Only the exact rendering of the parsed value is accepted.
        if time.to_string() != s {
            return Err(TimeError::new(s, "expected yyyy MMM dd HH:mm ZONE"));
        }

        Ok(time)
    }

    /// The absolute instant.
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// The zone this time was written in.
    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Wall-clock time in the original zone.
    pub fn local(&self) -> DateTime<FixedOffset> {
        self.instant.with_timezone(&self.zone.offset())
    }

    /// Wall-clock time in an arbitrary zone.
    pub fn in_zone(&self, zone: Zone) -> DateTime<FixedOffset> {
        self.instant.with_timezone(&zone.offset())
    }

    /// The day bucket this time falls in, judged in the canonical zone.
    ///
    /// Using a fixed zone (not the host's) keeps the result the same
    /// wherever the planner runs.
    pub fn day_bucket(&self, canonical: Zone) -> DayBucket {
        DayBucket(self.in_zone(canonical).date_naive())
    }

    /// Whether a connection from this arrival may only be made the next day.
    ///
    /// True when, in the canonical zone, the hour is past `cutoff_hour`, or
    /// equals it with a nonzero minute. A cutoff of 21 therefore spills
    /// 21:01 and later but not 21:00.
    pub fn spills_to_next_day(&self, cutoff_hour: u32, canonical: Zone) -> bool {
        let local = self.in_zone(canonical);
        let (hour, minute) = (local.hour(), local.minute());
        (hour == cutoff_hour && minute > 0) || hour > cutoff_hour
    }

    /// The same wall-clock time one calendar day later, in the same zone.
    pub fn add_one_day(&self) -> Result<Self, TimeError> {
        let local = self
            .local()
            .naive_local()
            .checked_add_days(Days::new(1))
            .ok_or_else(|| TimeError::new(self.to_string(), "date overflow"))?;

        let zoned = self
            .zone
            .offset()
            .from_local_datetime(&local)
            .single()
            .ok_or_else(|| TimeError::new(self.to_string(), "time does not exist in zone"))?;

        Ok(Self {
            instant: zoned.with_timezone(&Utc),
            zone: self.zone,
        })
    }

    /// Returns the duration between two times.
    ///
    /// Returns a negative duration if `other` is after `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        self.instant.signed_duration_since(other.instant)
    }
}

/// Gap between an arrival and a later departure.
///
/// Negative when the departure precedes the arrival; callers must reject
/// that rather than treat it as a tight connection.
pub fn connection_gap(arrival: FlightTime, departure: FlightTime) -> Duration {
    departure.signed_duration_since(arrival)
}

/// [`connection_gap`] in milliseconds.
pub fn connection_gap_millis(arrival: FlightTime, departure: FlightTime) -> i64 {
    connection_gap(arrival, departure).num_milliseconds()
}

impl Ord for FlightTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant
            .cmp(&other.instant)
            .then_with(|| self.zone.name.cmp(other.zone.name))
    }
}

impl PartialOrd for FlightTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for FlightTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlightTime({self})")
    }
}

impl fmt::Display for FlightTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.local().format(DATE_TIME_FORMAT),
            self.zone.name
        )
    }
}

impl Serialize for FlightTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> FlightTime {
        FlightTime::parse(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        let time = t("2016 May 10 00:34 GMT");
        let local = time.local();
        assert_eq!(local.date_naive(), date(2016, 5, 10));
        assert_eq!(local.hour(), 0);
        assert_eq!(local.minute(), 34);
        assert_eq!(time.zone(), Zone::GMT);

        let time = t("2016 Dec 31 23:59 PST");
        assert_eq!(time.zone().name(), "PST");
        assert_eq!(time.local().hour(), 23);
    }

    #[test]
    fn parse_keeps_absolute_instant() {
        // Same instant, written in two zones.
        let gmt = t("2016 May 10 22:30 GMT");
        let est = t("2016 May 10 17:30 EST");
        assert_eq!(gmt.instant(), est.instant());
        assert_ne!(gmt, est);
        assert_eq!(gmt.signed_duration_since(est), Duration::zero());
    }

    #[test]
    fn parse_invalid_format() {
        assert!(FlightTime::parse("").is_err());
        assert!(FlightTime::parse("2016-05-10 00:34 GMT").is_err());
        assert!(FlightTime::parse("2016 May 10 00:34").is_err());
        assert!(FlightTime::parse("2016 May 10 0034 GMT").is_err());
        assert!(FlightTime::parse("2016 Foo 10 00:34 GMT").is_err());
        assert!(FlightTime::parse("May 10 2016 00:34 GMT").is_err());
    }

    #[test]
    fn parse_rejects_loose_spellings() {
        for s in [
            "2016May 10 10:00 GMT",
            "2016 may 10 10:00 GMT",
            "2016 MAY 10 10:00 GMT",
            "2016 MAY 1 9:05 GMT",
            "2016 May 1 09:05 GMT",
            "2016 May 10 9:05 GMT",
            "2016 May  10 10:00 GMT",
            "2016 May 10 10:00  GMT",
            "  2016 May 10 10:00 GMT  ",
            "2016 May 10 10:00 GMT\n",
        ] {
            assert!(FlightTime::parse(s).is_err(), "accepted {s:?}");
        }
        assert!(FlightTime::parse("2016 May 01 09:05 GMT").is_ok());
    }

    #[test]
    fn parse_invalid_values() {
        assert!(FlightTime::parse("2016 May 10 24:00 GMT").is_err());
        assert!(FlightTime::parse("2016 May 10 12:60 GMT").is_err());
        assert!(FlightTime::parse("2016 Feb 30 12:00 GMT").is_err());
    }

    #[test]
    fn parse_unknown_zone() {
        let err = FlightTime::parse("2016 May 10 12:00 XYZ").unwrap_err();
        assert_eq!(err.input(), "2016 May 10 12:00 XYZ");
        assert!(err.to_string().contains("unknown time zone"));

        // Zone names are case-sensitive
        assert!(FlightTime::parse("2016 May 10 12:00 gmt").is_err());
    }

    #[test]
    fn zone_from_str() {
        let est: Zone = "EST".parse().unwrap();
        assert_eq!(est.name(), "EST");
        assert_eq!(est.offset().local_minus_utc(), -5 * HOUR);

        let err = "est".parse::<Zone>().unwrap_err();
        assert_eq!(err.input(), "est");
        assert!("".parse::<Zone>().is_err());
    }

    #[test]
    fn display_roundtrips_original_zone() {
        for s in [
            "2016 May 10 00:34 GMT",
            "2016 May 09 19:34 EST",
            "2016 Jan 01 05:00 PDT",
        ] {
            assert_eq!(t(s).to_string(), s);
        }
    }

    #[test]
    fn day_bucket_uses_canonical_zone() {
        // 20:30 EST is 01:30 GMT the next day
        let time = t("2016 May 10 20:30 EST");
        assert_eq!(time.day_bucket(Zone::GMT).to_string(), "2016_05_11");

        let est = Zone::parse("EST").unwrap();
        assert_eq!(time.day_bucket(est).to_string(), "2016_05_10");
    }

    #[test]
    fn day_bucket_format() {
        let bucket = DayBucket::new(date(2016, 5, 3));
        assert_eq!(bucket.to_string(), "2016_05_03");
        assert_eq!(format!("{:?}", bucket), "DayBucket(2016_05_03)");
    }

    #[test]
    fn next_day_spill_boundaries() {
        let gmt = Zone::GMT;
        assert!(!t("2016 May 10 20:59 GMT").spills_to_next_day(21, gmt));
        assert!(!t("2016 May 10 21:00 GMT").spills_to_next_day(21, gmt));
        assert!(t("2016 May 10 21:01 GMT").spills_to_next_day(21, gmt));
        assert!(t("2016 May 10 22:00 GMT").spills_to_next_day(21, gmt));
        assert!(t("2016 May 10 23:10 GMT").spills_to_next_day(21, gmt));
        assert!(!t("2016 May 10 00:30 GMT").spills_to_next_day(21, gmt));
    }

    #[test]
    fn next_day_spill_judged_in_canonical_zone() {
        // 17:30 EST is 22:30 GMT
        assert!(t("2016 May 10 17:30 EST").spills_to_next_day(21, Zone::GMT));
        // 01:00 GMT is 20:00 EST the previous evening
        assert!(!t("2016 May 11 01:00 GMT").spills_to_next_day(21, Zone::parse("EST").unwrap()));
    }

    #[test]
    fn add_one_day_keeps_wall_clock_and_zone() {
        let next = t("2016 May 10 23:10 EST").add_one_day().unwrap();
        assert_eq!(next.to_string(), "2016 May 11 23:10 EST");

        let next = t("2016 Dec 31 23:59 GMT").add_one_day().unwrap();
        assert_eq!(next.to_string(), "2017 Jan 01 23:59 GMT");

        let next = t("2016 Feb 28 12:00 GMT").add_one_day().unwrap();
        assert_eq!(next.to_string(), "2016 Feb 29 12:00 GMT");
    }

    #[test]
    fn connection_gap_signed() {
        let arrival = t("2016 May 10 10:00 GMT");
        let departure = t("2016 May 10 10:45 GMT");

        assert_eq!(connection_gap(arrival, departure), Duration::minutes(45));
        assert_eq!(connection_gap_millis(arrival, departure), 45 * 60 * 1000);
        assert_eq!(connection_gap_millis(departure, arrival), -45 * 60 * 1000);
        assert_eq!(connection_gap_millis(arrival, arrival), 0);
    }

    #[test]
    fn connection_gap_across_zones() {
        // Arrive 10:00 GMT, depart 06:30 EST (= 11:30 GMT)
        let arrival = t("2016 May 10 10:00 GMT");
        let departure = t("2016 May 10 06:30 EST");
        assert_eq!(connection_gap(arrival, departure), Duration::minutes(90));
    }

    #[test]
    fn ordering_by_instant() {
        let early = t("2016 May 10 10:00 GMT");
        let late = t("2016 May 10 06:30 EST");
        assert!(early < late);
        assert!(t("2016 May 11 00:00 GMT") > t("2016 May 10 23:59 GMT"));
    }

    #[test]
    fn zone_lookup() {
        assert_eq!(Zone::parse("GMT").unwrap(), Zone::GMT);
        assert_eq!(Zone::parse("EDT").unwrap().offset().local_minus_utc(), -4 * 3600);
        assert!(Zone::parse("BST").is_err());
        assert_eq!(Zone::default(), Zone::GMT);
    }

    #[test]
    fn serializes_as_display_string() {
        let json = serde_json::to_string(&t("2016 May 10 00:34 GMT")).unwrap();
        assert_eq!(json, "\"2016 May 10 00:34 GMT\"");
    }
}
