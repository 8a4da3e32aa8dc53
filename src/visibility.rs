//! Naked-eye planet visibility for a ground site.
//!
//! A planet counts as visible when its topocentric apparent altitude at the
//! 23:59 UTC observation instant reaches [`VISIBILITY_ALT_LIMIT`]. The outer
//! planets are evaluated at their system barycenter, which is what the de421
//! kernel carries; the offset to the planet itself is far below the 5°
//! threshold.

use crate::apparent::{altaz, apparent_direction};
use crate::constants::Degree;
use crate::observers::Observer;
use crate::provider::{get_ephemeris, get_timescale};
use crate::skywatch_errors::SkywatchError;
use crate::spk::naif_ids::{
    EARTH, JUPITER_BARYCENTER, MARS, MERCURY, NEPTUNE_BARYCENTER, SATURN_BARYCENTER,
    URANUS_BARYCENTER, VENUS,
};

/// The seven planets, in Sun-distance order, with the NAIF id used to look
/// them up in the kernel.
pub const PLANETS: [(&str, i32); 7] = [
    ("Mercury", MERCURY),
    ("Venus", VENUS),
    ("Mars", MARS),
    ("Jupiter", JUPITER_BARYCENTER),
    ("Saturn", SATURN_BARYCENTER),
    ("Uranus", URANUS_BARYCENTER),
    ("Neptune", NEPTUNE_BARYCENTER),
];

/// Minimum apparent altitude, in degrees, for a planet to count as visible.
pub const VISIBILITY_ALT_LIMIT: Degree = 5.0;

/// Names of the planets above [`VISIBILITY_ALT_LIMIT`] at 23:59 UTC on a
/// calendar date, as seen from a geodetic site. The returned list preserves
/// the order of [`PLANETS`].
pub fn get_visible_planets(
    year: i32,
    month: u8,
    day: u8,
    latitude: Degree,
    longitude: Degree,
) -> Result<Vec<&'static str>, SkywatchError> {
    // The timescale validates the date and the observer constructor the
    // coordinates, in that order, before any kernel access.
    let epoch = get_timescale().observation_epoch(year, month, day)?;
    let site = Observer::new(latitude, longitude)?;
    let kernel = get_ephemeris()?;

    let (earth_pos, earth_vel) = kernel.ssb_state(EARTH, epoch.to_et_seconds())?;
    let (site_pos, site_vel) = site.geocentric_state(&epoch);
    let observer_pos = earth_pos + site_pos;
    let observer_vel = earth_vel + site_vel;

    let mut visible = Vec::new();
    for (name, target) in PLANETS {
        let direction = apparent_direction(kernel, target, &epoch, &observer_pos, &observer_vel)?;
        let (altitude, azimuth) = altaz(&direction, &epoch, &site);
        log::debug!("{name}: altitude {altitude:.2}°, azimuth {azimuth:.2}°");
        if altitude >= VISIBILITY_ALT_LIMIT {
            visible.push(name);
        }
    }
    Ok(visible)
}
