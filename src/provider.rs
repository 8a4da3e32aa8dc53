//! Process-wide ephemeris and timescale singletons.
//!
//! Loading an SPK kernel pulls several megabytes of Chebyshev records into
//! memory, so the kernel is opened once and cached for the lifetime of the
//! process. The kernel path comes from the `SKYWATCH_EPHEMERIS` environment
//! variable and falls back to `de421.bsp` in the working directory.

use std::env;
use std::path::PathBuf;

use hifitime::Epoch;
use once_cell::sync::OnceCell;

use crate::skywatch_errors::SkywatchError;
use crate::spk::SpkKernel;
use crate::validators::validate_date;

/// Environment variable overriding the kernel path.
pub const EPHEMERIS_ENV: &str = "SKYWATCH_EPHEMERIS";

/// Kernel file used when [`EPHEMERIS_ENV`] is not set.
pub const DEFAULT_EPHEMERIS: &str = "de421.bsp";

/// Hour (UTC) of the daily observation instant.
pub const OBSERVATION_HOUR: u8 = 23;

/// Minute of the daily observation instant.
pub const OBSERVATION_MINUTE: u8 = 59;

static EPHEMERIS: OnceCell<SpkKernel> = OnceCell::new();
static TIMESCALE: OnceCell<Timescale> = OnceCell::new();

/// Shared SPK kernel, loaded on first use.
///
/// A load failure is not sticky: a later call retries after the kernel file
/// is put in place.
pub fn get_ephemeris() -> Result<&'static SpkKernel, SkywatchError> {
    EPHEMERIS.get_or_try_init(|| {
        let path = PathBuf::from(
            env::var(EPHEMERIS_ENV).unwrap_or_else(|_| DEFAULT_EPHEMERIS.to_string()),
        );
        log::info!("loading SPK kernel from {}", path.display());
        SpkKernel::load(&path)
    })
}

/// Shared timescale converter.
pub fn get_timescale() -> &'static Timescale {
    TIMESCALE.get_or_init(|| Timescale)
}

/// Calendar-to-epoch conversion with date validation.
///
/// Leap seconds come from the table hifitime embeds, so no external data file
/// is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timescale;

impl Timescale {
    /// Build a UTC epoch from calendar components, rejecting impossible
    /// dates such as February 30.
    pub fn utc(
        &self,
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
    ) -> Result<Epoch, SkywatchError> {
        validate_date(year, month, day)?;
        Ok(Epoch::from_gregorian_utc(year, month, day, hour, minute, 0, 0))
    }

    /// The daily observation instant: 23:59 UTC on the given date.
    pub fn observation_epoch(&self, year: i32, month: u8, day: u8) -> Result<Epoch, SkywatchError> {
        self.utc(year, month, day, OBSERVATION_HOUR, OBSERVATION_MINUTE)
    }
}
