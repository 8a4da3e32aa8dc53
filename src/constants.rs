//! # Constants and type definitions for skywatch
//!
//! Physical constants, conversion factors and the angle/distance type aliases
//! shared by the ephemeris reader, the frame transformations and the two
//! public calculators.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Earth equatorial radius in kilometers (WGS84)
pub const EARTH_MAJOR_AXIS: f64 = 6_378.137;

/// Earth polar radius in kilometers (WGS84)
pub const EARTH_MINOR_AXIS: f64 = 6_356.7523;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Earth sidereal rotation rate in rad/s
pub const EARTH_ROTATION_RATE: f64 = DPI * 1.00273790934 / SECONDS_PER_DAY;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
