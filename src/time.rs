use std::fmt::{self, Display};
use std::sync::LazyLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde::{Serialize, Serializer};

/// Offset from the start of the media timeline.
pub type Milliseconds = u64;

// `H:MM:SS` or `HH:MM:SS`, optional fractional seconds.
static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}):([0-5]\d):([0-5]\d(?:\.\d{1,9})?)$").expect("valid clock regex")
});

/// A chapter boundary as read from the input.
///
/// Only [`ChapterTime::At`] counts as a known boundary. `Invalid` keeps the
/// text that failed to parse so it can be reported.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ChapterTime {
    #[default]
    Missing,
    Invalid(String),
    At(Milliseconds),
}

impl ChapterTime {
    pub fn known(&self) -> Option<Milliseconds> {
        match self {
            ChapterTime::At(ms) => Some(*ms),
            _ => None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.known().is_some()
    }
}

impl Display for ChapterTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChapterTime::Missing => Ok(()),
            ChapterTime::Invalid(_) => f.write_str("NaN"),
            ChapterTime::At(ms) => write!(f, "{ms}"),
        }
    }
}

impl Serialize for ChapterTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ChapterTime::At(ms) => serializer.serialize_some(ms),
            _ => serializer.serialize_none(),
        }
    }
}

/// Parses a clock string such as `1:02:03` or `01:02:03.250` into the
/// offset from midnight.
///
/// Blank input is [`ChapterTime::Missing`]. Anything that is not a valid
/// wall-clock time comes back as [`ChapterTime::Invalid`] instead of an error.
pub fn parse_time(raw: Option<&str>) -> ChapterTime {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return ChapterTime::Missing;
    };

    let Some(caps) = CLOCK_RE.captures(raw) else {
        return ChapterTime::Invalid(raw.to_owned());
    };
    let padded = format!("{:0>2}:{}:{}", &caps[1], &caps[2], &caps[3]);

    match NaiveTime::parse_from_str(&padded, "%H:%M:%S%.f") {
        Ok(time) => {
            let ms = u64::from(time.num_seconds_from_midnight()) * 1000
                + u64::from(time.nanosecond() / 1_000_000);
            ChapterTime::At(ms)
        }
        Err(_) => ChapterTime::Invalid(raw.to_owned()),
    }
}

/// Formats an offset as `HH:MM:SS.mmm`.
pub fn format_time(ms: Milliseconds) -> String {
    let secs = ms / 1000;
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        ms % 1000
    )
}
