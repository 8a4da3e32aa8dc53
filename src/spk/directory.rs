//! Segment directory footer.
//!
//! The last four double-precision words of a type-2 segment describe its
//! record grid: initial epoch, record interval length, record size in
//! DP-words and the record count. DAF addresses count 8-byte words starting
//! at 1, so the footer lives at `(final_addr - 4) * 8` bytes.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};

#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    /// Initial epoch of the first record, ET seconds from J2000 TDB.
    pub init: f64,
    /// Time span of each record, in seconds.
    pub intlen: f64,
    /// Record size in double-precision words.
    pub rsize: usize,
    /// Number of records in the segment.
    pub n_records: usize,
}

impl Directory {
    /// Read the 4-word footer of a segment ending at `final_addr` (DP-words,
    /// 1-based).
    pub fn read(file: &mut BufReader<File>, final_addr: usize) -> std::io::Result<Self> {
        let mut buf = [0u8; 32];
        file.seek(SeekFrom::Start(((final_addr - 4) * 8) as u64))?;
        file.read_exact(&mut buf)?;

        let mut words = buf
            .chunks_exact(8)
            .map(|chunk| f64::from_le_bytes(chunk.try_into().expect("8-byte chunk")));
        let init = words.next().unwrap_or(0.0);
        let intlen = words.next().unwrap_or(0.0);
        let rsize = words.next().unwrap_or(0.0) as usize;
        let n_records = words.next().unwrap_or(0.0) as usize;

        Ok(Directory {
            init,
            intlen,
            rsize,
            n_records,
        })
    }

    /// Index of the record covering an ET epoch, clamped to the last record
    /// so that the exact segment end epoch stays addressable.
    pub fn record_index(&self, et_seconds: f64) -> usize {
        if self.n_records == 0 || self.intlen <= 0.0 {
            return 0;
        }
        let idx = ((et_seconds - self.init) / self.intlen).floor();
        (idx.max(0.0) as usize).min(self.n_records - 1)
    }
}
