//! Ground-based observer model.
//!
//! An observer is a point on the WGS84-like reference ellipsoid. Its
//! body-fixed position and diurnal-rotation velocity are computed once at
//! construction; [`Observer::geocentric_state`] rotates them into the
//! equatorial J2000 frame for a given epoch.

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::constants::{
    Degree, Kilometer, EARTH_MAJOR_AXIS, EARTH_MINOR_AXIS, EARTH_ROTATION_RATE,
};
use crate::earth_orientation::{gmst, prec};
use crate::ref_system::rotmt;
use crate::skywatch_errors::SkywatchError;
use crate::validators::validate_coordinates;

#[derive(Debug, Clone, PartialEq)]
pub struct Observer {
    /// Geodetic latitude in degrees, positive north.
    pub latitude: Degree,
    /// Geodetic longitude in degrees, positive east.
    pub longitude: Degree,
    /// Position in the Earth body-fixed frame (km).
    body_fixed_pos: Vector3<f64>,
    /// Diurnal-rotation velocity in the body-fixed frame (km/s).
    body_fixed_vel: Vector3<f64>,
}

impl Observer {
    /// Build an observer at sea level on the reference ellipsoid.
    ///
    /// Arguments
    /// -----------------
    /// * `latitude`: geodetic latitude in degrees, in `[-90, 90]`.
    /// * `longitude`: east longitude in degrees, in `[-180, 180]`.
    pub fn new(latitude: Degree, longitude: Degree) -> Result<Observer, SkywatchError> {
        validate_coordinates(latitude, longitude)?;

        let (rho_cos_phi, rho_sin_phi) = geodetic_to_parallax(latitude, 0.0);
        let lon_rad = longitude.to_radians();
        let body_fixed_pos = EARTH_MAJOR_AXIS
            * Vector3::new(
                rho_cos_phi * lon_rad.cos(),
                rho_cos_phi * lon_rad.sin(),
                rho_sin_phi,
            );
        // v = omega × r with omega along the rotation axis.
        let omega = Vector3::new(0.0, 0.0, EARTH_ROTATION_RATE);
        let body_fixed_vel = omega.cross(&body_fixed_pos);

        Ok(Observer {
            latitude,
            longitude,
            body_fixed_pos,
            body_fixed_vel,
        })
    }

    /// Geocentric position (km) and velocity (km/s) of the observer in the
    /// equatorial mean J2000 frame.
    ///
    /// The body-fixed state is rotated to the true equator of date with the
    /// Greenwich sidereal angle, then precessed back to J2000.
    pub fn geocentric_state(&self, epoch: &Epoch) -> (Vector3<f64>, Vector3<f64>) {
        let spin = rotmt(gmst(epoch.to_mjd_utc_days()), 2);
        let to_j2000 = prec(epoch.to_mjd_tt_days());
        let position = to_j2000 * (spin * self.body_fixed_pos);
        let velocity = to_j2000 * (spin * self.body_fixed_vel);
        (position, velocity)
    }
}

/// Normalized parallax coordinates of a site on the reference ellipsoid.
///
/// Arguments
/// -----------------
/// * `latitude`: geodetic latitude in degrees.
/// * `height`: height above the ellipsoid in km.
///
/// Return
/// ----------
/// * `(rho_cos_phi, rho_sin_phi)`, the equatorial and polar components of the
///   geocentric site vector in units of the equatorial radius.
pub fn geodetic_to_parallax(latitude: Degree, height: Kilometer) -> (f64, f64) {
    let axis_ratio = EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS;
    let lat_rad = latitude.to_radians();
    let u = (lat_rad.sin() * axis_ratio).atan2(lat_rad.cos());
    let rho_sin_phi = axis_ratio * u.sin() + (height / EARTH_MAJOR_AXIS) * lat_rad.sin();
    let rho_cos_phi = u.cos() + (height / EARTH_MAJOR_AXIS) * lat_rad.cos();
    (rho_cos_phi, rho_sin_phi)
}

#[cfg(test)]
mod test_observers {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parallax_on_equator() {
        let (rho_cos, rho_sin) = geodetic_to_parallax(0.0, 0.0);
        assert_relative_eq!(rho_cos, 1.0, epsilon = 1e-15);
        assert_relative_eq!(rho_sin, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_parallax_at_pole() {
        let (rho_cos, rho_sin) = geodetic_to_parallax(90.0, 0.0);
        assert_relative_eq!(rho_cos, 0.0, epsilon = 1e-15);
        assert_relative_eq!(rho_sin, EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS, epsilon = 1e-12);
    }

    #[test]
    fn test_observer_rejects_bad_latitude() {
        let err = Observer::new(95.0, 0.0).unwrap_err();
        assert!(matches!(err, SkywatchError::InvalidCoordinates { .. }));
    }

    #[test]
    fn test_equatorial_observer_speed() {
        // A site on the equator moves at about 0.465 km/s.
        let obs = Observer::new(0.0, 0.0).unwrap();
        let speed = obs.body_fixed_vel.norm();
        assert_relative_eq!(speed, 0.4651, epsilon = 1e-3);
    }

    #[test]
    fn test_geocentric_state_norms_are_frame_invariant() {
        let obs = Observer::new(52.23, 21.01).unwrap();
        let epoch = Epoch::from_gregorian_utc(2024, 6, 21, 23, 59, 0, 0);
        let (pos, vel) = obs.geocentric_state(&epoch);
        assert_relative_eq!(pos.norm(), obs.body_fixed_pos.norm(), epsilon = 1e-9);
        assert_relative_eq!(vel.norm(), obs.body_fixed_vel.norm(), epsilon = 1e-9);
    }
}
