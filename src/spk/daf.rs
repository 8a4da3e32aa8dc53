//! DAF (Double Precision Array File) header parsing.
//!
//! The first 1024-byte record of an SPK kernel describes the binary layout:
//! the summary shape (`ND`, `NI`), the doubly-linked list of summary records
//! (`fward`/`bward`), the first free address and the platform tag telling how
//! numeric data are encoded. Only little-endian (`LTL-IEEE`) kernels are
//! supported, which covers every DE kernel JPL ships today.

use nom::{bytes::complete::take, number::complete::le_i32, IResult};

/// Size of one DAF record in bytes.
pub const RECORD_BYTES: usize = 1024;

/// In-memory representation of the DAF header (first 1024-byte record).
#[derive(Debug, Clone, PartialEq)]
pub struct DafHeader {
    /// 8-byte format identifier, `"DAF/SPK"` (or `"NAIF/DAF"` on older kernels).
    pub idword: String,
    /// 60-byte padded internal kernel name.
    pub internal_filename: String,
    /// Number of double-precision components in each summary (ND).
    pub nd: i32,
    /// Number of integer components in each summary (NI).
    pub ni: i32,
    /// Record index (1-based) of the first summary record.
    pub fward: i32,
    /// Record index (1-based) of the last summary record.
    pub bward: i32,
    /// First free address, in double-precision words (1-based).
    pub free: i32,
    /// Platform tag describing the numeric representation (e.g. `"LTL-IEEE"`).
    pub locfmt: String,
}

impl DafHeader {
    /// Parse the first DAF record into a [`DafHeader`].
    ///
    /// Arguments
    /// -----------------
    /// * `input`: byte slice starting at the beginning of the file, at least
    ///   [`RECORD_BYTES`] long.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, idword) = take(8usize)(input)?;
        let (input, nd) = le_i32(input)?;
        let (input, ni) = le_i32(input)?;
        let (input, ifname) = take(60usize)(input)?;
        let (input, fward) = le_i32(input)?;
        let (input, bward) = le_i32(input)?;
        let (input, free) = le_i32(input)?;
        let (input, locfmt) = take(8usize)(input)?;

        Ok((
            input,
            DafHeader {
                idword: ascii_field(idword),
                internal_filename: ascii_field(ifname),
                nd,
                ni,
                fward,
                bward,
                free,
                locfmt: ascii_field(locfmt),
            },
        ))
    }

    /// Summary size in double-precision words: `ND + ceil(NI / 2)`.
    pub fn summary_words(&self) -> usize {
        self.nd as usize + (self.ni as usize).div_ceil(2)
    }

    /// Whether this header describes an SPK kernel this reader understands.
    pub fn is_supported_spk(&self) -> bool {
        let id_ok = self.idword == "DAF/SPK" || self.idword == "NAIF/DAF";
        id_ok && self.locfmt == "LTL-IEEE" && self.nd == 2 && self.ni == 6
    }
}

fn ascii_field(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_matches(|c: char| c.is_whitespace() || c == '\0')
        .to_string()
}
