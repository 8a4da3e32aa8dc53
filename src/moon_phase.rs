//! Lunar phase from the Sun–Moon elongation in ecliptic longitude.
//!
//! The phase angle is the geocentric apparent ecliptic longitude of the Moon
//! minus that of the Sun, normalized to `[0, 360)`. Eight 45°-wide buckets
//! centered on the principal phases classify it; each bucket includes its
//! lower edge, so 22.5° is already a Waxing Crescent while 337.5° wraps back
//! into New Moon.

use std::fmt;

use crate::apparent::{apparent_direction, ecliptic_longitude};
use crate::constants::Degree;
use crate::provider::{get_ephemeris, get_timescale};
use crate::skywatch_errors::SkywatchError;
use crate::spk::naif_ids::{EARTH, MOON, SUN};

/// The eight principal lunar phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl Phase {
    /// Classify an elongation angle in degrees, `[0, 360)`.
    pub fn from_angle(angle: Degree) -> Phase {
        if !(22.5..337.5).contains(&angle) {
            Phase::NewMoon
        } else if angle < 67.5 {
            Phase::WaxingCrescent
        } else if angle < 112.5 {
            Phase::FirstQuarter
        } else if angle < 157.5 {
            Phase::WaxingGibbous
        } else if angle < 202.5 {
            Phase::FullMoon
        } else if angle < 247.5 {
            Phase::WaningGibbous
        } else if angle < 292.5 {
            Phase::LastQuarter
        } else {
            Phase::WaningCrescent
        }
    }

    /// Human-readable phase name.
    pub fn name(&self) -> &'static str {
        match self {
            Phase::NewMoon => "New Moon",
            Phase::WaxingCrescent => "Waxing Crescent",
            Phase::FirstQuarter => "First Quarter",
            Phase::WaxingGibbous => "Waxing Gibbous",
            Phase::FullMoon => "Full Moon",
            Phase::WaningGibbous => "Waning Gibbous",
            Phase::LastQuarter => "Last Quarter",
            Phase::WaningCrescent => "Waning Crescent",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lunar phase on a given date together with the raw elongation angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPhase {
    pub phase: Phase,
    /// Sun–Moon elongation in ecliptic longitude, degrees in `[0, 360)`.
    pub angle: Degree,
}

/// Lunar phase at 23:59 UTC on a calendar date.
///
/// The timescale validates the date, so an impossible calendar triple fails
/// with [`SkywatchError::InvalidDate`] before any kernel access.
pub fn get_moon_phase(year: i32, month: u8, day: u8) -> Result<MoonPhase, SkywatchError> {
    let epoch = get_timescale().observation_epoch(year, month, day)?;
    let kernel = get_ephemeris()?;

    let (earth_pos, earth_vel) = kernel.ssb_state(EARTH, epoch.to_et_seconds())?;
    let sun = apparent_direction(kernel, SUN, &epoch, &earth_pos, &earth_vel)?;
    let moon = apparent_direction(kernel, MOON, &epoch, &earth_pos, &earth_vel)?;

    let angle = (ecliptic_longitude(&moon, &epoch) - ecliptic_longitude(&sun, &epoch))
        .rem_euclid(360.0);
    let phase = Phase::from_angle(angle);
    log::debug!("{year:04}-{month:02}-{day:02}: elongation {angle:.3}°, {phase}");

    Ok(MoonPhase { phase, angle })
}
