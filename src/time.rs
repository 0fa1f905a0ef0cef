use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;
use tracing::debug;

const MINUTES_PER_DAY: i64 = 1440;

/// Elapsed flight time in whole minutes. Always greater than zero.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Serialize, PartialOrd)]
pub struct FlightDuration(u64);

impl FlightDuration {
    /// Returns `None` for zero or negative spans.
    pub fn from_minutes(minutes: i64) -> Option<Self> {
        u64::try_from(minutes)
            .ok()
            .filter(|m| *m > 0)
            .map(FlightDuration)
    }

    pub fn total_minutes(&self) -> u64 {
        self.0
    }

    pub fn days(&self) -> u64 {
        self.0 / MINUTES_PER_DAY as u64
    }

    pub fn hours(&self) -> u64 {
        (self.0 % MINUTES_PER_DAY as u64) / 60
    }

    pub fn minutes(&self) -> u64 {
        self.0 % 60
    }
}

impl std::fmt::Display for FlightDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.days() > 0 {
            write!(f, "{}d ", self.days())?;
        }
        write!(f, "{:02}h {:02}m", self.hours(), self.minutes())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DurationError {
    /// `source` is `None` when chrono read the value but a field was too short.
    #[error("cannot parse {value:?} with pattern {pattern:?}")]
    Parse {
        value: String,
        pattern: String,
        #[source]
        source: Option<chrono::ParseError>,
    },
    #[error("arrival {arrival} is not after departure {departure}")]
    InvalidInterval { departure: String, arrival: String },
}

/// chrono patterns used to read ticket dates and times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeFormat {
    pub date: String,
    pub time: String,
}

impl DateTimeFormat {
    pub const DEFAULT_DATE: &'static str = "%d.%m.%y";
    // the hour may drop its leading zero ("9:05"), every other field is fixed width
    pub const DEFAULT_TIME: &'static str = "%H:%M";

    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        DateTimeFormat {
            date: date.into(),
            time: time.into(),
        }
    }

    fn parse_error(value: &str, pattern: &str, source: Option<chrono::ParseError>) -> DurationError {
        DurationError::Parse {
            value: value.to_string(),
            pattern: pattern.to_string(),
            source,
        }
    }

    // chrono reads numeric fields of any width up to two digits, so "1.5.8"
    // would pass as 01.05.2008. The value must print back unchanged.
    fn parse_date(&self, value: &str) -> Result<NaiveDate, DurationError> {
        let value = value.trim();
        let date = NaiveDate::parse_from_str(value, &self.date)
            .map_err(|e| Self::parse_error(value, &self.date, Some(e)))?;
        if date.format(&self.date).to_string() != value {
            return Err(Self::parse_error(value, &self.date, None));
        }
        Ok(date)
    }

    fn parse_time(&self, value: &str) -> Result<NaiveTime, DurationError> {
        let value = value.trim();
        let clock = NaiveTime::parse_from_str(value, &self.time)
            .map_err(|e| Self::parse_error(value, &self.time, Some(e)))?;
        let canonical = clock.format(&self.time).to_string();
        if canonical != value && canonical.strip_prefix('0') != Some(value) {
            return Err(Self::parse_error(value, &self.time, None));
        }
        Ok(clock)
    }
}

impl Default for DateTimeFormat {
    fn default() -> Self {
        DateTimeFormat::new(Self::DEFAULT_DATE, Self::DEFAULT_TIME)
    }
}

/// What to do with an arrival clock time that is not after the departure
/// clock time when no dates are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rollover {
    /// Arrival happens on the next calendar day.
    #[default]
    NextDay,
    /// Both events happen on the same day.
    Never,
}

enum Endpoint {
    Clock(NaiveTime),
    Instant(NaiveDateTime),
}

impl Endpoint {
    fn clock(&self) -> NaiveTime {
        match self {
            Endpoint::Clock(t) => *t,
            Endpoint::Instant(dt) => dt.time(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DurationCalculator {
    pub format: DateTimeFormat,
    pub rollover: Rollover,
}

impl DurationCalculator {
    pub fn new(format: DateTimeFormat, rollover: Rollover) -> Self {
        DurationCalculator { format, rollover }
    }

    fn resolve(&self, date: Option<&str>, time: &str) -> Result<Endpoint, DurationError> {
        let (date, time) = match date {
            Some(d) => (Some(d), time),
            // "14.05.18 10:30"
            None => match time.trim().split_once(char::is_whitespace) {
                Some((d, t)) => (Some(d), t),
                None => (None, time),
            },
        };
        let clock = self.format.parse_time(time)?;
        match date {
            Some(d) => Ok(Endpoint::Instant(self.format.parse_date(d)?.and_time(clock))),
            None => Ok(Endpoint::Clock(clock)),
        }
    }

    /// Time between departure and arrival.
    ///
    /// With a date on both ends the span is taken between the two absolute
    /// instants. Otherwise only the clock times are compared and
    /// [`Rollover`] decides whether an earlier arrival means the next day.
    /// Any span that is not strictly positive is an
    /// [`DurationError::InvalidInterval`].
    pub fn compute_duration(
        &self,
        departure_date: Option<&str>,
        departure_time: &str,
        arrival_date: Option<&str>,
        arrival_time: &str,
    ) -> Result<FlightDuration, DurationError> {
        let departure = self.resolve(departure_date, departure_time)?;
        let arrival = self.resolve(arrival_date, arrival_time)?;

        let minutes = match (&departure, &arrival) {
            (Endpoint::Instant(dep), Endpoint::Instant(arr)) => {
                arr.signed_duration_since(*dep).num_minutes()
            }
            _ => {
                let span = minute_of_day(arrival.clock()) - minute_of_day(departure.clock());
                match self.rollover {
                    Rollover::NextDay if span < 0 => {
                        debug!(departure_time, arrival_time, "arrival rolls over to the next day");
                        span + MINUTES_PER_DAY
                    }
                    _ => span,
                }
            }
        };

        FlightDuration::from_minutes(minutes).ok_or_else(|| DurationError::InvalidInterval {
            departure: endpoint_label(departure_date, departure_time),
            arrival: endpoint_label(arrival_date, arrival_time),
        })
    }
}

fn minute_of_day(t: NaiveTime) -> i64 {
    i64::from(t.hour()) * 60 + i64::from(t.minute())
}

fn endpoint_label(date: Option<&str>, time: &str) -> String {
    match date {
        Some(d) => format!("{} {}", d, time),
        None => time.to_string(),
    }
}
