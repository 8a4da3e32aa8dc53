//! Earth orientation models: mean obliquity of the ecliptic (IAU 1976),
//! precession from J2000 to the mean equator of date (IAU 1976), and
//! Greenwich Mean Sidereal Time (IAU 1982).
//!
//! Nutation is deliberately not modelled: the two consumers of these
//! rotations are a 45°-wide phase classification and a 5° altitude
//! threshold, both far above the ~20″ nutation amplitude.

use nalgebra::Matrix3;

use crate::constants::{Radian, DPI, MJD, RADEG, RADSEC, T2000};
use crate::ref_system::rotmt;

/// Compute the mean obliquity of the ecliptic at a given epoch (IAU 1976 model).
///
/// Arguments
/// -----------------
/// * `tjm`: Modified Julian Date (TT scale).
///
/// Return
/// ----------
/// * Mean obliquity ε in radians, from the cubic polynomial in Julian
///   centuries since J2000 evaluated with Horner's method.
pub fn obleq(tjm: MJD) -> Radian {
    // Obliquity coefficients (arcseconds)
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    let t = (tjm - T2000) / 36525.0;

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// Compute the precession matrix from the mean equator and equinox of date
/// back to J2000 (IAU 1976 model).
///
/// The transformation chains three rotations with the classical angles
/// ζ, θ, z expressed as polynomials in Julian centuries since J2000:
///
/// ```text
/// x_J2000 = R_z(−ζ) · R_y(θ) · R_z(−z) · x_mean(tjm)
/// ```
///
/// The transpose takes J2000 vectors into the mean frame of date.
///
/// Arguments
/// -----------------
/// * `tjm`: Modified Julian Date (TT scale) of the mean frame.
///
/// Return
/// ----------
/// * Orthonormal 3×3 matrix taking mean-equator-of-date vectors into the
///   equatorial J2000 frame.
pub fn prec(tjm: MJD) -> Matrix3<f64> {
    // Precession polynomial coefficients (degrees per century powers)
    let zed = 0.6406161 * RADEG;
    let zd = 0.6406161 * RADEG;
    let thd = 0.5567530 * RADEG;

    let zedd = 0.0000839 * RADEG;
    let zdd = 0.0003041 * RADEG;
    let thdd = -0.0001185 * RADEG;

    let zeddd = 0.0000050 * RADEG;
    let zddd = 0.0000051 * RADEG;
    let thddd = -0.0000116 * RADEG;

    let t = (tjm - T2000) / 36525.0;

    let zeta = ((zeddd * t + zedd) * t + zed) * t;
    let z = ((zddd * t + zdd) * t + zd) * t;
    let theta = ((thddd * t + thdd) * t + thd) * t;

    let r1 = rotmt(-zeta, 2);
    let r2 = rotmt(theta, 1);
    let r3 = rotmt(-z, 2);

    (r1 * r2) * r3
}

/// Compute the Greenwich Mean Sidereal Time for a given MJD (UT1 scale),
/// in radians normalized to [0, 2π).
///
/// The IAU 1982 cubic polynomial gives GMST at 0h UT1; the fractional-day
/// contribution is added with the solar-to-sidereal rate ratio.
pub fn gmst(tjm: MJD) -> Radian {
    // GMST at 0h UT1 (seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    let mut gmst0 = ((C3 * t + C2) * t + C1) * t + C0;
    gmst0 *= DPI / 86400.0;

    let h = tjm.fract() * DPI;
    let gmst = gmst0 + h * RAP;

    gmst.rem_euclid(DPI)
}

#[cfg(test)]
mod test_earth_orientation {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_obliquity_at_j2000() {
        // ε(J2000) = 23°26′21.448″
        assert_relative_eq!(obleq(T2000), 0.40909280422232897, epsilon = 1e-15);
    }

    #[test]
    fn test_prec_identity_at_j2000() {
        let p = prec(T2000);
        assert_relative_eq!((p - Matrix3::identity()).norm(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_prec_is_orthonormal() {
        let p = prec(60482.0);
        let should_be_identity = p * p.transpose();
        assert_relative_eq!(
            (should_be_identity - Matrix3::identity()).norm(),
            0.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(p.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_prec_direction() {
        // Precession carries the equinox westward, so a direction fixed in
        // space at the J2000 equinox gains right ascension in the mean frame
        // of a later date.
        let to_of_date = prec(60482.0).transpose();
        let star = to_of_date * nalgebra::Vector3::x();
        assert!(star.y > 0.0);
        assert!(star.z > 0.0);
    }

    #[test]
    fn test_gmst_at_j2000() {
        // GMST at J2000.0 is 18h 41m 50.548s ≈ 4.894961 rad
        assert_relative_eq!(gmst(T2000), 4.894961212789145, epsilon = 1e-12);
    }

    #[test]
    fn test_gmst_range() {
        for mjd in [43041.93932, 51544.5, 57028.47851, 60482.99930] {
            let g = gmst(mjd);
            assert!((0.0..DPI).contains(&g), "gmst({mjd}) = {g} out of range");
        }
    }

    #[test]
    fn test_gmst_advances_by_sidereal_rate() {
        // One solar day advances GMST by ~3m 56.6s of sidereal time.
        let g0 = gmst(60000.25);
        let g1 = gmst(60001.25);
        let delta = (g1 - g0).rem_euclid(DPI);
        let expected = DPI * (1.00273790934 - 1.0);
        assert_relative_eq!(delta, expected, epsilon = 1e-6);
    }
}
