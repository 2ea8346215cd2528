//! Second-granularity date-formatting cache.
//!
//! Rendering a wall-clock timestamp into text is expensive relative to how
//! often a loaded server does it: most log lines written in the same second
//! carry the same formatted value. [`DateCache`] renders each distinct
//! second once and hands every other caller in that second a shared,
//! already formatted string, lock-free on the hit path.
//!
//! ```no_run
//! use tickdate::DateCache;
//!
//! let cache = DateCache::with_format("yyyy-MM-dd HH:mm:ss")?;
//! let line = cache.now()?;
//! # Ok::<(), tickdate::DateError>(())
//! ```

pub mod cache;
pub mod error;
pub mod zone;

mod format;
mod locale;
mod pattern;

pub use cache::{DEFAULT_FORMAT, DateCache, DateCacheConfig};
pub use error::DateError;
pub use zone::Zone;
