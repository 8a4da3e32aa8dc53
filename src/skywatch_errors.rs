use thiserror::Error;

/// Error taxonomy of the skywatch core.
///
/// Validation errors (`InvalidDate`, `InvalidCoordinates`) are raised before
/// any ephemeris access and are always correctable by the caller. The
/// remaining variants surface kernel problems: a file that cannot be loaded,
/// a body the kernel does not carry, or a date outside its coverage.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkywatchError {
    #[error("invalid date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u8, day: u8 },

    #[error("invalid coordinates: {field} {value} outside [{min}, {max}]")]
    InvalidCoordinates {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("ephemeris unavailable: {0}")]
    EphemerisUnavailable(String),

    #[error("no ephemeris segment for NAIF body {0}")]
    MissingSegment(i32),

    #[error("epoch {et_seconds} s TDB outside the ephemeris span for NAIF body {target}")]
    OutsideEphemerisSpan { target: i32, et_seconds: f64 },
}
