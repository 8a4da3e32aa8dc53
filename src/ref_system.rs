//! Rotations between the celestial reference frames used by the
//! apparent-position engine: equatorial mean J2000, equatorial mean of date
//! and ecliptic mean of date.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::MJD;
use crate::earth_orientation::{obleq, prec};

/// Construct a right-handed 3×3 rotation matrix around one of the principal
/// axes (X, Y or Z).
///
/// Arguments
/// -----------------
/// * `alpha`: rotation angle in **radians** (positive = trigonometric sense).
/// * `k`: axis index, `0` → X, `1` → Y, `2` → Z.
///
/// Return
/// ----------
/// * Active rotation matrix `R` such that the rotated vector is `x' = R · x`.
///
/// Panics
/// ----------
/// * If `k > 2`.
pub fn rotmt(alpha: f64, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** rotmt: invalid axis index {k} (must be 0,1,2) ****"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Rotation taking equatorial mean J2000 coordinates into the mean ecliptic
/// and equinox of date: precession to the equator of date followed by the
/// obliquity tilt about the X axis.
///
/// Arguments
/// -----------------
/// * `tjm`: Modified Julian Date (TT scale) of the target ecliptic frame.
pub fn equm_j2000_to_eclm(tjm: MJD) -> Matrix3<f64> {
    // prec maps of-date → J2000; its transpose precesses forward.
    rotmt(-obleq(tjm), 0) * prec(tjm).transpose()
}
