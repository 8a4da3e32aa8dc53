//! # skywatch
//!
//! Nightly-sky summaries from a local JPL planetary ephemeris: the lunar
//! phase for a calendar date and the list of planets above the horizon for a
//! ground site, both evaluated at 23:59 UTC.
//!
//! The crate reads a binary SPK kernel (`de421.bsp` by default, overridable
//! through the `SKYWATCH_EPHEMERIS` environment variable) with its own DAF
//! reader, interpolates Chebyshev barycentric states, and applies light-time,
//! aberration, precession and sidereal rotation to obtain apparent places.
//! The kernel is loaded once per process and shared.
//!
//! ## Example
//!
//! ```no_run
//! use skywatch::{get_moon_phase, get_visible_planets};
//!
//! let moon = get_moon_phase(2024, 6, 21)?;
//! println!("{} ({:.1}°)", moon.phase, moon.angle);
//!
//! let planets = get_visible_planets(2024, 6, 21, 52.23, 21.01)?;
//! println!("visible tonight: {planets:?}");
//! # Ok::<(), skywatch::SkywatchError>(())
//! ```

pub mod apparent;
pub mod constants;
pub mod earth_orientation;
pub mod moon_phase;
pub mod observers;
pub mod provider;
pub mod ref_system;
pub mod skywatch_errors;
pub mod spk;
pub mod validators;
pub mod visibility;

pub use moon_phase::{get_moon_phase, MoonPhase, Phase};
pub use observers::Observer;
pub use provider::{get_ephemeris, get_timescale, Timescale};
pub use skywatch_errors::SkywatchError;
pub use visibility::{get_visible_planets, PLANETS, VISIBILITY_ALT_LIMIT};
