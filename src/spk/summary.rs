//! Segment summary decoding.
//!
//! Each SPK segment is described by a fixed-shape summary: two doubles
//! (coverage epochs in ET seconds) followed by six integers (target, center,
//! frame, data type and the segment address range in double-precision words).

use nom::{
    number::complete::{le_f64, le_i32},
    IResult,
};

/// Chebyshev position-only segments (SPK type 2), the only kind the planetary
/// DE kernels contain and the only kind this reader interpolates.
pub const DATA_TYPE_CHEBYSHEV_POSITION: i32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Segment coverage start, ET seconds from J2000 TDB.
    pub start_epoch: f64,
    /// Segment coverage end, ET seconds from J2000 TDB.
    pub end_epoch: f64,
    /// NAIF id of the target body.
    pub target: i32,
    /// NAIF id of the center the positions are relative to.
    pub center: i32,
    /// Reference frame id (1 = J2000).
    pub frame_id: i32,
    /// SPK data type.
    pub data_type: i32,
    /// First address of the segment data, in DP-words (1-based).
    pub initial_addr: i32,
    /// Last address of the segment data, in DP-words (1-based).
    pub final_addr: i32,
}

impl Summary {
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, start_epoch) = le_f64(input)?;
        let (input, end_epoch) = le_f64(input)?;
        let (input, target) = le_i32(input)?;
        let (input, center) = le_i32(input)?;
        let (input, frame_id) = le_i32(input)?;
        let (input, data_type) = le_i32(input)?;
        let (input, initial_addr) = le_i32(input)?;
        let (input, final_addr) = le_i32(input)?;

        Ok((
            input,
            Summary {
                start_epoch,
                end_epoch,
                target,
                center,
                frame_id,
                data_type,
                initial_addr,
                final_addr,
            },
        ))
    }

    /// Whether an ET epoch (seconds from J2000 TDB) falls inside the coverage.
    pub fn covers(&self, et_seconds: f64) -> bool {
        (self.start_epoch..=self.end_epoch).contains(&et_seconds)
    }
}
