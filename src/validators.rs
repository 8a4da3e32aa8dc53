//! Pure input validators shared by the two calculators.
//!
//! Both functions are total, depend on nothing but their arguments, and are
//! invoked before any ephemeris access so that a bad request never reaches
//! the apparent-position engine.

use crate::skywatch_errors::SkywatchError;

/// Check that `(year, month, day)` forms a real Gregorian calendar date.
///
/// Arguments
/// -----------------
/// * `year`: calendar year.
/// * `month`: calendar month (1–12).
/// * `day`: calendar day, checked against the month length and leap years.
///
/// Return
/// ----------
/// * `Ok(())` for an existing date, [`SkywatchError::InvalidDate`] otherwise.
pub fn validate_date(year: i32, month: u8, day: u8) -> Result<(), SkywatchError> {
    if hifitime::is_gregorian_valid(year, month, day, 0, 0, 0, 0) {
        Ok(())
    } else {
        Err(SkywatchError::InvalidDate { year, month, day })
    }
}

/// Check that a geodetic position lies on the Earth reference ellipsoid:
/// latitude in [-90, 90] and longitude in [-180, 180], both in degrees.
/// NaN is rejected on either axis.
///
/// Return
/// ----------
/// * `Ok(())` or [`SkywatchError::InvalidCoordinates`] naming the violated
///   field and its bounds.
pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), SkywatchError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(SkywatchError::InvalidCoordinates {
            field: "latitude",
            value: lat,
            min: -90.0,
            max: 90.0,
        });
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(SkywatchError::InvalidCoordinates {
            field: "longitude",
            value: lon,
            min: -180.0,
            max: 180.0,
        });
    }
    Ok(())
}
