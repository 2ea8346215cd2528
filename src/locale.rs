//! Baked locale name tables for textual date fields.
//!
//! A small subset of CLDR data (months, weekdays, day-period markers) for
//! common locales. Unknown identifiers fall back to `en-US`, so locale
//! resolution never fails.

use once_cell::sync::Lazy;

/// Name tables for one locale.
#[derive(Debug)]
pub(crate) struct LocaleData {
    /// Month names, wide form, index 0 = January.
    pub months_wide: [&'static str; 12],
    /// Month names, abbreviated form.
    pub months_abbr: [&'static str; 12],
    /// Weekday names, wide form, index 0 = Sunday.
    pub days_wide: [&'static str; 7],
    /// Weekday names, abbreviated form.
    pub days_abbr: [&'static str; 7],
    pub am: &'static str,
    pub pm: &'static str,
}

/// Resolve a locale identifier, accepting both `en_US` and `en-US` spellings.
pub(crate) fn lookup(locale: &str) -> &'static LocaleData {
    let normalized = locale.to_ascii_lowercase().replace('_', "-");
    match normalized.as_str() {
        "de" | "de-de" | "de-at" | "de-ch" => &DE,
        "fr" | "fr-fr" | "fr-ca" | "fr-be" | "fr-ch" => &FR,
        "es" | "es-es" | "es-mx" | "es-ar" => &ES,
        "it" | "it-it" => &IT,
        "ja" | "ja-jp" => &JA,
        _ => &EN,
    }
}

/// Locale from the process environment (`LC_ALL`, `LC_TIME`, `LANG`),
/// resolved once. Falls back to `en-US` when unset or unrecognized.
pub(crate) fn system() -> &'static LocaleData {
    static SYSTEM: Lazy<&'static LocaleData> = Lazy::new(|| {
        for var in ["LC_ALL", "LC_TIME", "LANG"] {
            if let Ok(value) = std::env::var(var) {
                if !value.is_empty() && value != "C" && value != "POSIX" {
                    // "en_US.UTF-8" -> "en_US"
                    let id = value.split('.').next().unwrap_or(&value);
                    return lookup(id);
                }
            }
        }
        &EN
    });
    *SYSTEM
}

static EN: LocaleData = LocaleData {
    months_wide: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    months_abbr: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    days_wide: [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ],
    days_abbr: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    am: "AM",
    pm: "PM",
};

static DE: LocaleData = LocaleData {
    months_wide: [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ],
    months_abbr: [
        "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sep.", "Okt.", "Nov.",
        "Dez.",
    ],
    days_wide: [
        "Sonntag",
        "Montag",
        "Dienstag",
        "Mittwoch",
        "Donnerstag",
        "Freitag",
        "Samstag",
    ],
    days_abbr: ["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."],
    am: "AM",
    pm: "PM",
};

static FR: LocaleData = LocaleData {
    months_wide: [
        "janvier",
        "février",
        "mars",
        "avril",
        "mai",
        "juin",
        "juillet",
        "août",
        "septembre",
        "octobre",
        "novembre",
        "décembre",
    ],
    months_abbr: [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
        "déc.",
    ],
    days_wide: [
        "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
    ],
    days_abbr: ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
    am: "AM",
    pm: "PM",
};

static ES: LocaleData = LocaleData {
    months_wide: [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ],
    months_abbr: [
        "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
    ],
    days_wide: [
        "domingo",
        "lunes",
        "martes",
        "miércoles",
        "jueves",
        "viernes",
        "sábado",
    ],
    days_abbr: ["dom", "lun", "mar", "mié", "jue", "vie", "sáb"],
    am: "a.\u{a0}m.",
    pm: "p.\u{a0}m.",
};

static IT: LocaleData = LocaleData {
    months_wide: [
        "gennaio",
        "febbraio",
        "marzo",
        "aprile",
        "maggio",
        "giugno",
        "luglio",
        "agosto",
        "settembre",
        "ottobre",
        "novembre",
        "dicembre",
    ],
    months_abbr: [
        "gen", "feb", "mar", "apr", "mag", "giu", "lug", "ago", "set", "ott", "nov", "dic",
    ],
    days_wide: [
        "domenica",
        "lunedì",
        "martedì",
        "mercoledì",
        "giovedì",
        "venerdì",
        "sabato",
    ],
    days_abbr: ["dom", "lun", "mar", "mer", "gio", "ven", "sab"],
    am: "AM",
    pm: "PM",
};

static JA: LocaleData = LocaleData {
    months_wide: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
    months_abbr: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
    days_wide: [
        "日曜日",
        "月曜日",
        "火曜日",
        "水曜日",
        "木曜日",
        "金曜日",
        "土曜日",
    ],
    days_abbr: ["日", "月", "火", "水", "木", "金", "土"],
    am: "午前",
    pm: "午後",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_accepts_both_separator_styles() {
        assert!(std::ptr::eq(lookup("fr_FR"), &FR));
        assert!(std::ptr::eq(lookup("fr-fr"), &FR));
        assert!(std::ptr::eq(lookup("FR"), &FR));
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        assert!(std::ptr::eq(lookup("tlh"), &EN));
        assert!(std::ptr::eq(lookup(""), &EN));
    }

    #[test]
    fn tables_are_consistent() {
        for data in [&EN, &DE, &FR, &ES, &IT, &JA] {
            assert_eq!(data.months_wide.len(), 12);
            assert_eq!(data.days_abbr.len(), 7);
            assert!(!data.am.is_empty() && !data.pm.is_empty());
        }
    }
}
