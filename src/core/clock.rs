use chrono::{
    DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Timelike,
};

pub const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Truncates minutes, seconds and sub-seconds.
#[must_use]
pub fn start_of_hour(time: NaiveDateTime) -> NaiveDateTime {
    time.date()
        .and_hms_opt(time.hour(), 0, 0)
        .unwrap_or(time)
}

/// Start of the containing hour, stepped back one more hour when odd.
#[must_use]
pub fn floor_to_even_hour(time: NaiveDateTime) -> NaiveDateTime {
    let hour_start = start_of_hour(time);
    if hour_start.hour() % 2 == 0 {
        hour_start
    } else {
        hour_start - Duration::hours(1)
    }
}

/// Adds a fractional number of hours with millisecond resolution.
///
/// Returns `None` for non-finite input or when the result leaves chrono's
/// representable range.
#[must_use]
pub fn add_hours(time: NaiveDateTime, hours: f64) -> Option<NaiveDateTime> {
    if !hours.is_finite() {
        return None;
    }
    let millis = (hours * MILLIS_PER_HOUR).round();
    if millis.abs() > (i64::MAX / 2) as f64 {
        return None;
    }
    time.checked_add_signed(Duration::milliseconds(millis as i64))
}

/// Signed hour distance `to - from`.
#[must_use]
pub fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Conversion of untrusted time input into a calendar timestamp.
///
/// Returns `None` when the value is not a valid calendar time.
pub trait IntoRulerTime {
    fn into_ruler_time(self) -> Option<NaiveDateTime>;
}

impl IntoRulerTime for NaiveDateTime {
    fn into_ruler_time(self) -> Option<NaiveDateTime> {
        Some(self)
    }
}

impl<Tz: TimeZone> IntoRulerTime for DateTime<Tz> {
    fn into_ruler_time(self) -> Option<NaiveDateTime> {
        Some(self.with_timezone(&Local).naive_local())
    }
}

impl IntoRulerTime for Option<NaiveDateTime> {
    fn into_ruler_time(self) -> Option<NaiveDateTime> {
        self
    }
}

/// Milliseconds since the Unix epoch, read on the host's local calendar.
impl IntoRulerTime for f64 {
    fn into_ruler_time(self) -> Option<NaiveDateTime> {
        if !self.is_finite() {
            return None;
        }
        let millis = self.round();
        if millis.abs() > (i64::MAX / 2) as f64 {
            return None;
        }
        match Local.timestamp_millis_opt(millis as i64) {
            LocalResult::Single(time) => Some(time.naive_local()),
            LocalResult::Ambiguous(earliest, _) => Some(earliest.naive_local()),
            LocalResult::None => None,
        }
    }
}

impl IntoRulerTime for &str {
    fn into_ruler_time(self) -> Option<NaiveDateTime> {
        parse_time_str(self)
    }
}

impl IntoRulerTime for String {
    fn into_ruler_time(self) -> Option<NaiveDateTime> {
        parse_time_str(&self)
    }
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn parse_time_str(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return time.into_ruler_time();
    }
    for format in NAIVE_FORMATS {
        if let Ok(time) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(time);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
