//! Apparent places of Solar System bodies.
//!
//! Combines barycentric ephemeris states into the apparent direction of a
//! body as seen by an observer: light-time correction by iteration on the
//! retarded epoch, then annual/diurnal aberration from the observer velocity.
//! Helpers project that direction onto the coordinates the rest of the crate
//! consumes, ecliptic longitude of date and horizontal altitude/azimuth.

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::constants::{Degree, Radian, VLIGHT};
use crate::earth_orientation::{gmst, prec};
use crate::observers::Observer;
use crate::ref_system::equm_j2000_to_eclm;
use crate::skywatch_errors::SkywatchError;
use crate::spk::SpkKernel;

/// Light-time fixed-point iterations. Three rounds converge well below a
/// milliarcsecond even for Neptune.
const LIGHT_TIME_ITERATIONS: usize = 3;

/// Apparent unit direction (equatorial mean J2000) from an observer to a
/// body.
///
/// Arguments
/// -----------------
/// * `kernel`: loaded SPK kernel.
/// * `target`: NAIF id of the body.
/// * `epoch`: observation epoch.
/// * `observer_pos`: observer position relative to the SSB, km.
/// * `observer_vel`: observer velocity relative to the SSB, km/s.
pub fn apparent_direction(
    kernel: &SpkKernel,
    target: i32,
    epoch: &Epoch,
    observer_pos: &Vector3<f64>,
    observer_vel: &Vector3<f64>,
) -> Result<Vector3<f64>, SkywatchError> {
    let et = epoch.to_et_seconds();

    // Solve r(et - tau) - obs with tau = |r|/c by fixed point.
    let mut tau = 0.0;
    let mut relative = Vector3::zeros();
    for _ in 0..LIGHT_TIME_ITERATIONS {
        let (target_pos, _) = kernel.ssb_state(target, et - tau)?;
        relative = target_pos - observer_pos;
        tau = relative.norm() / VLIGHT;
    }

    // Aberration: tilt the unit vector by the observer velocity.
    let direction = (relative.normalize() + observer_vel / VLIGHT).normalize();
    Ok(direction)
}

/// Ecliptic longitude of date of a J2000 unit direction, in degrees
/// normalized to `[0, 360)`.
pub fn ecliptic_longitude(direction: &Vector3<f64>, epoch: &Epoch) -> Degree {
    let ecliptic = equm_j2000_to_eclm(epoch.to_mjd_tt_days()) * direction;
    ecliptic.y.atan2(ecliptic.x).to_degrees().rem_euclid(360.0)
}

/// Horizontal coordinates of a J2000 unit direction for a ground site.
///
/// Return
/// ----------
/// * `(altitude, azimuth)` in degrees; azimuth counted from North through
///   East, in `[0, 360)`.
pub fn altaz(direction: &Vector3<f64>, epoch: &Epoch, site: &Observer) -> (Degree, Degree) {
    // Precess to the equator of date before taking RA/Dec.
    let of_date = prec(epoch.to_mjd_tt_days()).transpose() * direction;
    let dec = of_date.z.asin();
    let ra = of_date.y.atan2(of_date.x);

    let lst = gmst(epoch.to_mjd_utc_days()) + site.longitude.to_radians();
    let hour_angle = lst - ra;
    altaz_from_hadec(hour_angle, dec, site.latitude.to_radians())
}

/// Altitude and azimuth (degrees) from hour angle, declination and geodetic
/// latitude, all in radians.
pub(crate) fn altaz_from_hadec(hour_angle: Radian, dec: Radian, lat: Radian) -> (Degree, Degree) {
    let sin_alt = lat.sin() * dec.sin() + lat.cos() * dec.cos() * hour_angle.cos();
    let altitude = sin_alt.clamp(-1.0, 1.0).asin();
    let azimuth = (-hour_angle.sin() * dec.cos())
        .atan2(dec.sin() * lat.cos() - dec.cos() * hour_angle.cos() * lat.sin());
    (
        altitude.to_degrees(),
        azimuth.to_degrees().rem_euclid(360.0),
    )
}

#[cfg(test)]
mod test_apparent {
    use super::*;
    use crate::constants::T2000;
    use approx::assert_relative_eq;

    #[test]
    fn test_altaz_on_meridian() {
        // A body on the celestial equator crossing the meridian at latitude
        // 45° stands 45° high, due south.
        let (alt, az) = altaz_from_hadec(0.0, 0.0, 45f64.to_radians());
        assert_relative_eq!(alt, 45.0, epsilon = 1e-12);
        assert_relative_eq!(az, 180.0, epsilon = 1e-12);
    }

    #[test]
    fn test_altaz_celestial_pole() {
        // The north celestial pole sits at the latitude altitude, due north.
        let (alt, az) = altaz_from_hadec(1.3, 90f64.to_radians(), 52f64.to_radians());
        assert_relative_eq!(alt, 52.0, epsilon = 1e-9);
        assert_relative_eq!(az, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_altaz_east_horizon() {
        // Equatorial body six hours before transit, seen from the equator:
        // rising due east on the horizon.
        let (alt, az) = altaz_from_hadec(-std::f64::consts::FRAC_PI_2, 0.0, 0.0);
        assert_relative_eq!(alt, 0.0, epsilon = 1e-12);
        assert_relative_eq!(az, 90.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ecliptic_longitude_of_solstice_direction() {
        // Equatorial direction (0, cos ε, sin ε) is the June-solstice point,
        // ecliptic longitude 90°.
        let epoch = Epoch::from_mjd_utc(T2000);
        let eps = crate::earth_orientation::obleq(T2000);
        let lon = ecliptic_longitude(&Vector3::new(0.0, eps.cos(), eps.sin()), &epoch);
        assert_relative_eq!(lon, 90.0, epsilon = 1e-2);
    }
}
