//! Time zone binding: IANA named zones or fixed UTC offsets.

use std::{fmt, str::FromStr};

use chrono::{FixedOffset, NaiveDateTime, Offset, TimeZone};
use chrono_tz::{OffsetComponents, OffsetName, Tz};
use once_cell::sync::Lazy;

use crate::error::DateError;

static SYSTEM_ZONE: Lazy<Zone> = Lazy::new(|| {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse::<Tz>().ok())
        .map(Zone::Named)
        .unwrap_or(Zone::UTC)
});

/// The zone a cache renders under.
///
/// Named zones resolve their offset and abbreviation live at render time,
/// so daylight-savings transitions are honored. Fixed zones carry a single
/// offset forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// An IANA zone, e.g. `Europe/Paris`.
    Named(Tz),
    /// A fixed offset from UTC, e.g. `+05:30`.
    Fixed(FixedOffset),
}

impl Zone {
    pub const UTC: Zone = Zone::Named(Tz::UTC);

    /// The platform default zone, resolved once per process. Falls back to
    /// UTC when the platform zone cannot be determined or is not an IANA
    /// name.
    pub fn system() -> Zone {
        *SYSTEM_ZONE
    }

    /// Raw (base, non-DST) offset from UTC in milliseconds as of now.
    /// Positive east of UTC, negative west.
    pub(crate) fn raw_offset_millis(&self) -> i64 {
        match self {
            Zone::Named(tz) => {
                let now = chrono::Utc::now().naive_utc();
                tz.offset_from_utc_datetime(&now)
                    .base_utc_offset()
                    .num_milliseconds()
            }
            Zone::Fixed(offset) => i64::from(offset.local_minus_utc()) * 1000,
        }
    }

    /// Offset in effect at the given UTC instant.
    pub(crate) fn offset_at(&self, utc: &NaiveDateTime) -> FixedOffset {
        match self {
            Zone::Named(tz) => tz.offset_from_utc_datetime(utc).fix(),
            Zone::Fixed(offset) => *offset,
        }
    }

    /// Short zone name at the given UTC instant (`UTC`, `CEST`, ...).
    /// Zones without an abbreviation, and fixed offsets, render as the
    /// offset itself.
    pub(crate) fn write_short_name(&self, utc: &NaiveDateTime, out: &mut String) {
        use fmt::Write;
        match self {
            Zone::Named(tz) => {
                let offset = tz.offset_from_utc_datetime(utc);
                match offset.abbreviation() {
                    Some(abbr) => out.push_str(abbr),
                    None => {
                        let _ = write!(out, "{}", offset.fix());
                    }
                }
            }
            Zone::Fixed(offset) => {
                let _ = write!(out, "{offset}");
            }
        }
    }

    /// Long zone name: the full IANA identifier for named zones.
    pub(crate) fn long_name(&self) -> Option<&'static str> {
        match self {
            Zone::Named(tz) => Some(tz.name()),
            Zone::Fixed(_) => None,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Named(tz) => f.write_str(tz.name()),
            Zone::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

impl FromStr for Zone {
    type Err = DateError;

    /// Accepts IANA names (`America/New_York`), `UTC`/`GMT`/`Z`, and fixed
    /// offsets in `±HH:MM`, `±HHMM` or `±HH` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("UTC") || s.eq_ignore_ascii_case("GMT") || s == "Z" {
            return Ok(Zone::UTC);
        }
        if let Some(offset) = parse_fixed_offset(s) {
            return Ok(Zone::Fixed(offset));
        }
        s.parse::<Tz>()
            .map(Zone::Named)
            .map_err(|_| DateError::ZoneUnknown(s.to_owned()))
    }
}

fn parse_fixed_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1i32, &s[1..]),
        b'-' => (-1i32, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || digits.len() > 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.parse::<i32>().ok()?, 0),
        3 => (digits[..1].parse().ok()?, digits[1..].parse().ok()?),
        _ => (digits[..2].parse().ok()?, digits[2..].parse().ok()?),
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
