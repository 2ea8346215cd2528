//! The formatter engine: renders an instant under a bound
//! (pattern, zone, locale) triple.
//!
//! Pattern syntax is the CLDR date field grammar
//! (https://unicode.org/reports/tr35/tr35-dates.html#Date_Field_Symbol_Table),
//! restricted to whole-second fields. The pattern is parsed once at
//! construction; rendering is stateless and thread-safe.

use chrono::{Datelike, TimeZone, Timelike, Utc};

use crate::{error::DateError, locale::LocaleData, zone::Zone};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Literal(String),
    Year(usize),
    Month(usize),
    Day(usize),
    Weekday(usize),
    Hour24(usize),
    Hour12(usize),
    Minute(usize),
    Second(usize),
    AmPm,
    /// `z` run: zone name, resolved live at render time.
    ZoneName(usize),
    /// `Z` run that survived the offset rewrite: live offset as `±HHMM`.
    ZoneOffset,
}

pub(crate) struct Formatter {
    items: Vec<Item>,
    zone: Zone,
    locale: &'static LocaleData,
    capacity: usize,
}

impl Formatter {
    /// Parse `pattern` eagerly. Unsupported letters, sub-second fields,
    /// unterminated quotes and patterns without a seconds field all fail
    /// here rather than on the first render.
    pub(crate) fn new(
        pattern: &str,
        zone: Zone,
        locale: &'static LocaleData,
    ) -> Result<Self, DateError> {
        let items = parse(pattern)?;
        if !items.iter().any(|i| matches!(i, Item::Second(_))) {
            return Err(DateError::InvalidPattern(
                "pattern must contain a seconds field ('ss')".to_owned(),
            ));
        }
        let capacity = items
            .iter()
            .map(|i| match i {
                Item::Literal(s) => s.len(),
                _ => 8,
            })
            .sum();
        Ok(Self {
            items,
            zone,
            locale,
            capacity,
        })
    }

    /// Render the instant given as milliseconds since the Unix epoch.
    pub(crate) fn render(&self, millis: i64) -> Result<String, DateError> {
        let utc = Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or(DateError::OutOfRange(millis))?;
        let naive_utc = utc.naive_utc();
        let offset = self.zone.offset_at(&naive_utc);
        let local = utc.with_timezone(&offset);

        let mut out = String::with_capacity(self.capacity);
        let mut buf = itoa::Buffer::new();
        for item in &self.items {
            match item {
                Item::Literal(text) => out.push_str(text),
                Item::Year(width) => {
                    if *width == 2 {
                        pad_number(&mut out, (local.year() % 100).unsigned_abs(), 2);
                    } else {
                        out.push_str(buf.format(local.year()));
                    }
                }
                Item::Month(width) => match *width {
                    1 | 2 => pad_number(&mut out, local.month(), *width),
                    3 => out.push_str(self.locale.months_abbr[local.month0() as usize]),
                    _ => out.push_str(self.locale.months_wide[local.month0() as usize]),
                },
                Item::Day(width) => pad_number(&mut out, local.day(), *width),
                Item::Weekday(width) => {
                    let day = local.weekday().num_days_from_sunday() as usize;
                    if *width <= 3 {
                        out.push_str(self.locale.days_abbr[day]);
                    } else {
                        out.push_str(self.locale.days_wide[day]);
                    }
                }
                Item::Hour24(width) => pad_number(&mut out, local.hour(), *width),
                Item::Hour12(width) => {
                    let hour = match local.hour() % 12 {
                        0 => 12,
                        h => h,
                    };
                    pad_number(&mut out, hour, *width);
                }
                Item::Minute(width) => pad_number(&mut out, local.minute(), *width),
                Item::Second(width) => pad_number(&mut out, local.second(), *width),
                Item::AmPm => {
                    if local.hour() < 12 {
                        out.push_str(self.locale.am);
                    } else {
                        out.push_str(self.locale.pm);
                    }
                }
                Item::ZoneName(width) => {
                    if *width >= 4 {
                        match self.zone.long_name() {
                            Some(name) => out.push_str(name),
                            None => self.zone.write_short_name(&naive_utc, &mut out),
                        }
                    } else {
                        self.zone.write_short_name(&naive_utc, &mut out);
                    }
                }
                Item::ZoneOffset => {
                    let total = offset.local_minus_utc();
                    let (sign, abs) = if total >= 0 { ('+', total) } else { ('-', -total) };
                    out.push(sign);
                    pad_number(&mut out, (abs / 3600) as u32, 2);
                    pad_number(&mut out, (abs % 3600 / 60) as u32, 2);
                }
            }
        }
        Ok(out)
    }
}

fn parse(pattern: &str) -> Result<Vec<Item>, DateError> {
    let mut items = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' => {
                // '' outside a quoted section is an escaped quote
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    literal.push('\'');
                    continue;
                }
                let mut closed = false;
                while let Some(c) = chars.next() {
                    if c == '\'' {
                        if chars.peek() == Some(&'\'') {
                            chars.next();
                            literal.push('\'');
                            continue;
                        }
                        closed = true;
                        break;
                    }
                    literal.push(c);
                }
                if !closed {
                    return Err(DateError::InvalidPattern(
                        "unterminated quoted literal".to_owned(),
                    ));
                }
            }
            c if c.is_ascii_alphabetic() => {
                let count = 1 + consume_same(&mut chars, c);
                flush_literal(&mut items, &mut literal);
                items.push(field(c, count)?);
            }
            other => literal.push(other),
        }
    }
    flush_literal(&mut items, &mut literal);
    Ok(items)
}

fn field(letter: char, count: usize) -> Result<Item, DateError> {
    match letter {
        'y' => Ok(Item::Year(count)),
        'M' => Ok(Item::Month(count)),
        'd' => Ok(Item::Day(count)),
        'E' => Ok(Item::Weekday(count)),
        'H' => Ok(Item::Hour24(count)),
        'h' => Ok(Item::Hour12(count)),
        'm' => Ok(Item::Minute(count)),
        's' => Ok(Item::Second(count)),
        'a' => Ok(Item::AmPm),
        'z' => Ok(Item::ZoneName(count)),
        'Z' => Ok(Item::ZoneOffset),
        'S' => Err(DateError::InvalidPattern(
            "sub-second field 'S' cannot be cached at second granularity".to_owned(),
        )),
        other => Err(DateError::InvalidPattern(format!(
            "unsupported pattern letter '{other}'"
        ))),
    }
}

fn consume_same(chars: &mut std::iter::Peekable<std::str::Chars>, ch: char) -> usize {
    let mut count = 0;
    while chars.peek() == Some(&ch) {
        chars.next();
        count += 1;
    }
    count
}

fn flush_literal(items: &mut Vec<Item>, literal: &mut String) {
    if !literal.is_empty() {
        items.push(Item::Literal(std::mem::take(literal)));
    }
}

fn pad_number(out: &mut String, value: u32, min_width: usize) {
    let mut buf = itoa::Buffer::new();
    let s = buf.format(value);
    for _ in s.len()..min_width {
        out.push('0');
    }
    out.push_str(s);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale;
    use chrono::FixedOffset;

    fn utc(pattern: &str) -> Formatter {
        Formatter::new(pattern, Zone::UTC, locale::lookup("en-US")).unwrap()
    }

    #[test]
    fn renders_default_pattern_at_epoch() {
        let f = utc("EEE MMM dd HH:mm:ss zzz yyyy");
        assert_eq!(f.render(0).unwrap(), "Thu Jan 01 00:00:00 UTC 1970");
    }

    #[test]
    fn renders_iso_like_pattern() {
        let f = utc("yyyy-MM-dd HH:mm:ss");
        assert_eq!(f.render(1_700_000_000_000).unwrap(), "2023-11-14 22:13:20");
    }

    #[test]
    fn renders_quoted_offset_literal_under_fixed_zone() {
        let zone = Zone::Fixed(FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap());
        let f = Formatter::new("HH:mm:ss '+0530'", zone, locale::lookup("en")).unwrap();
        assert_eq!(f.render(0).unwrap(), "05:30:00 +0530");
    }

    #[test]
    fn negative_fixed_zone_rolls_into_prior_day() {
        let zone = Zone::Fixed(FixedOffset::east_opt(-8 * 3600).unwrap());
        let f =
            Formatter::new("yyyy-MM-dd HH:mm:ss '-0800'", zone, locale::lookup("en")).unwrap();
        assert_eq!(f.render(0).unwrap(), "1969-12-31 16:00:00 -0800");
    }

    #[test]
    fn twelve_hour_clock_and_day_period() {
        let f = utc("hh:mm:ss a");
        assert_eq!(f.render(0).unwrap(), "12:00:00 AM");
        // 22:13:20 UTC
        assert_eq!(f.render(1_700_000_000_000).unwrap(), "10:13:20 PM");
    }

    #[test]
    fn wide_and_abbreviated_names_follow_locale() {
        let f = Formatter::new(
            "EEEE d MMMM yyyy HH:mm:ss",
            Zone::UTC,
            locale::lookup("fr"),
        )
        .unwrap();
        // 2023-11-14 was a Tuesday
        assert_eq!(
            f.render(1_700_000_000_000).unwrap(),
            "mardi 14 novembre 2023 22:13:20"
        );
    }

    #[test]
    fn leftover_offset_marker_renders_live() {
        let zone = Zone::Fixed(FixedOffset::east_opt(3600).unwrap());
        let f = Formatter::new("HH:mm:ss Z", zone, locale::lookup("en")).unwrap();
        assert_eq!(f.render(0).unwrap(), "01:00:00 +0100");
    }

    #[test]
    fn named_zone_abbreviation_tracks_dst() {
        let paris: Zone = "Europe/Paris".parse().unwrap();
        let f = Formatter::new("HH:mm:ss zzz", paris, locale::lookup("en")).unwrap();
        // 2024-01-15 00:00 UTC / 2024-07-15 00:00 UTC
        assert_eq!(f.render(1_705_276_800_000).unwrap(), "01:00:00 CET");
        assert_eq!(f.render(1_721_001_600_000).unwrap(), "02:00:00 CEST");
    }

    #[test]
    fn long_zone_name_is_the_iana_id() {
        let f = utc("HH:mm:ss zzzz");
        assert_eq!(f.render(0).unwrap(), "00:00:00 UTC");
    }

    #[test]
    fn escaped_quotes_in_literals() {
        let f = utc("ss 'o''clock'");
        assert_eq!(f.render(0).unwrap(), "00 o'clock");
    }

    #[test]
    fn rejects_sub_second_fields() {
        assert!(matches!(
            Formatter::new("HH:mm:ss.SSS", Zone::UTC, locale::lookup("en")),
            Err(DateError::InvalidPattern(_))
        ));
    }

    #[test]
    fn rejects_unsupported_letters() {
        assert!(matches!(
            Formatter::new("ss Q", Zone::UTC, locale::lookup("en")),
            Err(DateError::InvalidPattern(_))
        ));
    }

    #[test]
    fn rejects_missing_seconds_field() {
        assert!(matches!(
            Formatter::new("yyyy-MM-dd HH:mm", Zone::UTC, locale::lookup("en")),
            Err(DateError::InvalidPattern(_))
        ));
    }

    #[test]
    fn rejects_unterminated_quote() {
        assert!(matches!(
            Formatter::new("ss 'stuck", Zone::UTC, locale::lookup("en")),
            Err(DateError::InvalidPattern(_))
        ));
    }

    #[test]
    fn out_of_range_instant_is_an_error() {
        let f = utc("yyyy-MM-dd HH:mm:ss");
        assert!(matches!(
            f.render(i64::MAX),
            Err(DateError::OutOfRange(_))
        ));
    }

    #[test]
    fn negative_millis_floor_into_prior_second() {
        let f = utc("yyyy-MM-dd HH:mm:ss");
        assert_eq!(f.render(-1).unwrap(), "1969-12-31 23:59:59");
    }
}
