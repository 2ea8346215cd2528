//! Pattern rewriting: pre-materializes the zone offset into the format
//! string so the render path never revisits the zone rules for it.

use crate::zone::Zone;

/// The zone-offset marker. Only the first occurrence is substituted; any
/// trailing `Z` run left behind is rendered live by the formatter.
const OFFSET_PLACEHOLDER: &str = "ZZZ";

/// Replace the first `ZZZ` with a quoted `±HHMM` literal computed from the
/// zone's raw (non-DST) offset at call time. Patterns without the marker
/// pass through untouched.
///
/// Sub-minute offset remainders round toward zero.
pub(crate) fn rewrite_offset(format: &str, zone: &Zone) -> String {
    let Some(index) = format.find(OFFSET_PLACEHOLDER) else {
        return format.to_owned();
    };

    let mut millis = zone.raw_offset_millis();
    let mut out = String::with_capacity(format.len() + 8);
    out.push_str(&format[..index]);
    out.push('\'');
    if millis >= 0 {
        out.push('+');
    } else {
        millis = -millis;
        out.push('-');
    }

    let total_minutes = millis / 60_000;
    let (hours, minutes) = (total_minutes / 60, total_minutes % 60);
    let mut buf = itoa::Buffer::new();
    if hours < 10 {
        out.push('0');
    }
    out.push_str(buf.format(hours));
    if minutes < 10 {
        out.push('0');
    }
    out.push_str(buf.format(minutes));
    out.push('\'');
    out.push_str(&format[index + OFFSET_PLACEHOLDER.len()..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn fixed(secs: i32) -> Zone {
        Zone::Fixed(FixedOffset::east_opt(secs).unwrap())
    }

    #[test]
    fn substitutes_positive_offset() {
        let zone = fixed(5 * 3600 + 30 * 60);
        assert_eq!(
            rewrite_offset("HH:mm:ss ZZZ", &zone),
            "HH:mm:ss '+0530'"
        );
    }

    #[test]
    fn substitutes_negative_offset() {
        let zone = fixed(-8 * 3600);
        assert_eq!(
            rewrite_offset("HH:mm:ss ZZZ", &zone),
            "HH:mm:ss '-0800'"
        );
    }

    #[test]
    fn utc_renders_plus_zero() {
        assert_eq!(rewrite_offset("ZZZ", &Zone::UTC), "'+0000'");
    }

    #[test]
    fn passes_through_without_placeholder() {
        let zone = fixed(3600);
        assert_eq!(
            rewrite_offset("yyyy-MM-dd HH:mm:ss", &zone),
            "yyyy-MM-dd HH:mm:ss"
        );
    }

    #[test]
    fn only_first_occurrence_is_substituted() {
        let zone = fixed(3600);
        assert_eq!(rewrite_offset("ZZZ ZZZ", &zone), "'+0100' ZZZ");
    }

    #[test]
    fn sub_minute_offset_rounds_toward_zero() {
        // Historical zones carried offsets like +00:25:21.
        let zone = fixed(25 * 60 + 21);
        assert_eq!(rewrite_offset("ZZZ", &zone), "'+0025'");
    }
}
