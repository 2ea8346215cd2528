//! The tick cache: at most one render per distinct wall-clock second.
//!
//! Under load a server stamps many log lines inside the same second; the
//! calendar/locale/zone work is paid once per second and every other call
//! in that second returns the already rendered string. The slot holding the
//! `(second, rendered)` pair is swapped atomically, so concurrent callers
//! either hit it or race benignly to repopulate it with equal values.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

use arc_swap::ArcSwapOption;
use bytes::BytesMut;

use crate::{error::DateError, format::Formatter, locale, pattern, zone::Zone};

/// The default format, equivalent to `java.util.Date#toString()` output:
/// `"Thu Jan 01 00:00:00 UTC 1970"`.
pub const DEFAULT_FORMAT: &str = "EEE MMM dd HH:mm:ss zzz yyyy";

/// Construction options for [`DateCache`]. Frozen once the cache is built.
#[derive(Debug, Clone)]
pub struct DateCacheConfig {
    /// Format string. Must contain a seconds field (`ss`) and no
    /// sub-second field.
    pub format: String,
    /// Locale identifier for textual fields (month and weekday names,
    /// AM/PM markers). `None` means the platform default.
    pub locale: Option<String>,
    /// Zone the output is rendered under.
    pub zone: Zone,
}

impl Default for DateCacheConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_owned(),
            locale: None,
            zone: Zone::system(),
        }
    }
}

/// One rendered second. Replaced wholesale on rollover so readers never
/// observe a torn pair.
struct Tick {
    second: i64,
    rendered: Arc<str>,
}

/// A date formatter that caches the most recently rendered second.
///
/// If the format string carries the `ZZZ` offset marker, the zone's raw
/// (non-DST) offset is baked into the pattern as a literal at construction
/// time; for zones with daylight savings the displayed offset stays at the
/// construction-time value year round. Use the `zzz` zone-name marker
/// instead when DST-correct output is required.
///
/// All methods take `&self`; the cache is safe to share across threads.
pub struct DateCache {
    format: String,
    zone: Zone,
    formatter: Formatter,
    tick: ArcSwapOption<Tick>,
    renders: AtomicU64,
}

impl DateCache {
    /// Build a cache from the given configuration. The format string is
    /// validated and the offset marker rewritten here, never on the render
    /// path.
    pub fn new(config: DateCacheConfig) -> Result<Self, DateError> {
        let locale = match config.locale.as_deref() {
            Some(id) => locale::lookup(id),
            None => locale::system(),
        };
        let effective = pattern::rewrite_offset(&config.format, &config.zone);
        let formatter = Formatter::new(&effective, config.zone, locale)?;
        tracing::debug!(
            format = %config.format,
            effective = %effective,
            zone = %config.zone,
            "date cache ready"
        );
        Ok(Self {
            format: config.format,
            zone: config.zone,
            formatter,
            tick: ArcSwapOption::const_empty(),
            renders: AtomicU64::new(0),
        })
    }

    /// Convenience constructor: the given format with platform default
    /// locale and zone.
    pub fn with_format(format: &str) -> Result<Self, DateError> {
        Self::new(DateCacheConfig {
            format: format.to_owned(),
            ..DateCacheConfig::default()
        })
    }

    /// Format an instant given as milliseconds since the Unix epoch.
    ///
    /// The hot path: when the instant falls in the same whole second as the
    /// previous call, the cached string is returned without rendering.
    pub fn format_millis(&self, millis: i64) -> Result<Arc<str>, DateError> {
        let second = millis.div_euclid(1000);
        if let Some(tick) = &*self.tick.load() {
            if tick.second == second {
                return Ok(tick.rendered.clone());
            }
        }

        let base = second
            .checked_mul(1000)
            .ok_or(DateError::OutOfRange(millis))?;
        let rendered: Arc<str> = Arc::from(self.render(base)?);
        self.tick.store(Some(Arc::new(Tick {
            second,
            rendered: rendered.clone(),
        })));
        Ok(rendered)
    }

    /// Format a [`SystemTime`].
    pub fn format(&self, at: SystemTime) -> Result<Arc<str>, DateError> {
        self.format_millis(system_time_millis(at)?)
    }

    /// Semantic alias for [`Self::format_millis`] for call sites asserting
    /// the value is close to real time.
    pub fn format_now(&self, now: i64) -> Result<Arc<str>, DateError> {
        self.format_millis(now)
    }

    /// Format the current wall-clock time.
    pub fn now(&self) -> Result<Arc<str>, DateError> {
        self.format(SystemTime::now())
    }

    /// Append the formatted instant to an output buffer.
    pub fn append_millis(&self, millis: i64, dst: &mut BytesMut) -> Result<(), DateError> {
        let rendered = self.format_millis(millis)?;
        dst.extend_from_slice(rendered.as_bytes());
        Ok(())
    }

    /// The original format string, as supplied at construction.
    pub fn format_string(&self) -> &str {
        &self.format
    }

    /// The configured zone.
    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    /// Number of formatter invocations so far. Cache hits do not render, so
    /// under second-clustered input this stays near the number of elapsed
    /// seconds regardless of call volume.
    pub fn renders(&self) -> u64 {
        self.renders.load(Ordering::Relaxed)
    }

    fn render(&self, base_millis: i64) -> Result<String, DateError> {
        self.renders.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(second = base_millis / 1000, "tick rollover, rendering");
        self.formatter.render(base_millis)
    }
}

fn system_time_millis(at: SystemTime) -> Result<i64, DateError> {
    match at.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_millis()).map_err(|_| DateError::OutOfRange(i64::MAX)),
        Err(before) => {
            let millis = i64::try_from(before.duration().as_millis())
                .map_err(|_| DateError::OutOfRange(i64::MIN))?;
            Ok(-millis)
        }
    }
}
