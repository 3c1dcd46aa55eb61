use crate::types::{
    config_error::ConfigError,
    consts::{IMAGE_NAME_PATTERN, TIMESTAMP_FORMAT},
};
use chrono::{DateTime, MappedLocalTime, NaiveDateTime, TimeDelta, TimeZone, Timelike};
use chrono_tz::{OffsetComponents, Tz};
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

static IMAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(IMAGE_NAME_PATTERN)
        .case_insensitive(true)
        .build()
        .expect("image name pattern is valid")
});

/// What a file name says about the moment its image was captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStamp {
    /// Not a timestamp-named png/jpg/jpeg file.
    Ignored,
    /// Looks like a capture but the date-time does not exist on the calendar.
    Invalid(String),
    Naive(NaiveDateTime),
}

pub fn parse_file_name(name: &str) -> FileStamp {
    let Some(stamp) = IMAGE_NAME.captures(name).and_then(|c| c.get(1)) else {
        return FileStamp::Ignored;
    };
    match NaiveDateTime::parse_from_str(stamp.as_str(), TIMESTAMP_FORMAT) {
        // chrono reads second 60 as a leap second; capture names never carry one.
        Ok(naive) if naive.nanosecond() >= 1_000_000_000 => {
            FileStamp::Invalid("second must be in 0..=59".to_string())
        }
        Ok(naive) => FileStamp::Naive(naive),
        Err(e) => FileStamp::Invalid(e.to_string()),
    }
}

/// Looks up an IANA zone name, falling back to a case-insensitive match.
pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.parse::<Tz>()
        .ok()
        .or_else(|| Tz::from_str_insensitive(name).ok())
        .ok_or_else(|| ConfigError::UnknownTimezone(name.to_string()))
}

/// Places a wall-clock time in `tz`.
///
/// A time repeated by a fall-back transition resolves to its standard-time
/// reading. A time skipped by a spring-forward transition yields `None`.
pub fn localize(naive: &NaiveDateTime, tz: &Tz) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(naive) {
        MappedLocalTime::Single(dt) => Some(dt),
        MappedLocalTime::Ambiguous(earlier, later) => Some(prefer_standard(earlier, later)),
        MappedLocalTime::None => None,
    }
}

fn prefer_standard(earlier: DateTime<Tz>, later: DateTime<Tz>) -> DateTime<Tz> {
    match (is_dst(&earlier), is_dst(&later)) {
        (false, true) => earlier,
        _ => later,
    }
}

fn is_dst(dt: &DateTime<Tz>) -> bool {
    dt.offset().dst_offset() != TimeDelta::zero()
}
