//! Binary SPK kernel reader.
//!
//! Loads a NAIF DAF/SPK planetary ephemeris (e.g. `de421.bsp`) fully into
//! memory and evaluates Chebyshev position/velocity states. Segments store a
//! body relative to its center (the Moon relative to the Earth-Moon
//! barycenter, planets relative to the Solar System Barycenter or their own
//! barycenter), so [`SpkKernel::ssb_state`] chains segments until it reaches
//! the SSB.

pub mod daf;
pub mod directory;
pub mod record;
pub mod summary;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use nalgebra::Vector3;

use crate::skywatch_errors::SkywatchError;
use daf::{DafHeader, RECORD_BYTES};
use directory::Directory;
use record::SpkRecord;
use summary::{Summary, DATA_TYPE_CHEBYSHEV_POSITION};

/// NAIF integer codes for the bodies the de421 kernel carries.
pub mod naif_ids {
    pub const SOLAR_SYSTEM_BARYCENTER: i32 = 0;
    pub const EARTH_MOON_BARYCENTER: i32 = 3;
    pub const JUPITER_BARYCENTER: i32 = 5;
    pub const SATURN_BARYCENTER: i32 = 6;
    pub const URANUS_BARYCENTER: i32 = 7;
    pub const NEPTUNE_BARYCENTER: i32 = 8;
    pub const SUN: i32 = 10;
    pub const MERCURY: i32 = 199;
    pub const VENUS: i32 = 299;
    pub const MOON: i32 = 301;
    pub const EARTH: i32 = 399;
    pub const MARS: i32 = 499;
}

/// One type-2 segment with its record grid resident in memory.
#[derive(Debug, Clone)]
pub struct Segment {
    pub summary: Summary,
    pub directory: Directory,
    records: Vec<SpkRecord>,
}

impl Segment {
    /// Record covering an ET epoch.
    fn record_at(&self, et_seconds: f64) -> &SpkRecord {
        &self.records[self.directory.record_index(et_seconds)]
    }
}

/// An SPK kernel loaded into memory, with one segment per target body.
#[derive(Debug, Clone)]
pub struct SpkKernel {
    pub header: DafHeader,
    segments: HashMap<i32, Segment>,
}

impl SpkKernel {
    /// Load an SPK kernel from disk.
    ///
    /// Reads the DAF header, walks the summary-record chain starting at
    /// `fward` and materializes every type-2 segment. Segments of other data
    /// types are skipped with a warning.
    pub fn load(path: &Path) -> Result<SpkKernel, SkywatchError> {
        let file = File::open(path).map_err(|e| {
            SkywatchError::EphemerisUnavailable(format!("cannot open {}: {e}", path.display()))
        })?;
        let mut file = BufReader::new(file);

        let mut first_record = [0u8; RECORD_BYTES];
        file.read_exact(&mut first_record).map_err(|e| {
            SkywatchError::EphemerisUnavailable(format!(
                "cannot read DAF header of {}: {e}",
                path.display()
            ))
        })?;
        let (_, header) = DafHeader::parse(&first_record).map_err(|e| {
            SkywatchError::EphemerisUnavailable(format!(
                "malformed DAF header in {}: {e}",
                path.display()
            ))
        })?;
        if !header.is_supported_spk() {
            return Err(SkywatchError::EphemerisUnavailable(format!(
                "{} is not a little-endian SPK kernel (idword {:?}, locfmt {:?})",
                path.display(),
                header.idword,
                header.locfmt
            )));
        }

        let summaries = read_summaries(&mut file, &header, path)?;
        let file_len = file
            .get_ref()
            .metadata()
            .map_err(|e| {
                SkywatchError::EphemerisUnavailable(format!(
                    "cannot stat {}: {e}",
                    path.display()
                ))
            })?
            .len();

        let mut segments = HashMap::with_capacity(summaries.len());
        for summary in summaries {
            if summary.data_type != DATA_TYPE_CHEBYSHEV_POSITION {
                log::warn!(
                    "skipping segment for body {} with unsupported SPK type {}",
                    summary.target,
                    summary.data_type
                );
                continue;
            }
            // A type-2 segment holds at least its 4-word directory and must
            // lie inside the file.
            if summary.initial_addr < 1
                || summary.final_addr < summary.initial_addr + 4
                || summary.final_addr as u64 * 8 > file_len
            {
                return Err(SkywatchError::EphemerisUnavailable(format!(
                    "segment for body {} has a corrupt address range {}..{}",
                    summary.target, summary.initial_addr, summary.final_addr
                )));
            }
            let directory =
                Directory::read(&mut file, summary.final_addr as usize).map_err(|e| {
                    SkywatchError::EphemerisUnavailable(format!(
                        "cannot read segment directory for body {}: {e}",
                        summary.target
                    ))
                })?;
            // rsize covers mid, radius and at least one coefficient per axis;
            // records plus the directory may not exceed the segment span.
            let span = (summary.final_addr - summary.initial_addr + 1) as usize;
            let data_words = directory.rsize.checked_mul(directory.n_records);
            if directory.rsize < 5
                || directory.n_records == 0
                || !matches!(data_words, Some(words) if words <= span - 4)
            {
                return Err(SkywatchError::EphemerisUnavailable(format!(
                    "segment for body {} has a corrupt record layout ({} records of {} words in a {span}-word segment)",
                    summary.target, directory.n_records, directory.rsize
                )));
            }
            let records = SpkRecord::read_segment(
                &mut file,
                summary.initial_addr as usize,
                directory.rsize,
                directory.n_records,
            )
            .map_err(|e| {
                SkywatchError::EphemerisUnavailable(format!(
                    "cannot read records for body {}: {e}",
                    summary.target
                ))
            })?;
            log::debug!(
                "loaded segment: body {} around {} ({} records)",
                summary.target,
                summary.center,
                records.len()
            );
            segments.insert(
                summary.target,
                Segment {
                    summary,
                    directory,
                    records,
                },
            );
        }

        Ok(SpkKernel { header, segments })
    }

    /// Whether the kernel carries a segment for a NAIF body id.
    pub fn has_target(&self, target: i32) -> bool {
        self.segments.contains_key(&target)
    }

    /// Position (km) and velocity (km/s) of a body relative to its segment
    /// center, in the equatorial J2000 frame.
    pub fn segment_state(
        &self,
        target: i32,
        et_seconds: f64,
    ) -> Result<(Vector3<f64>, Vector3<f64>), SkywatchError> {
        let segment = self
            .segments
            .get(&target)
            .ok_or(SkywatchError::MissingSegment(target))?;
        if !segment.summary.covers(et_seconds) {
            return Err(SkywatchError::OutsideEphemerisSpan { target, et_seconds });
        }
        Ok(segment.record_at(et_seconds).interpolate(et_seconds))
    }

    /// Position (km) and velocity (km/s) of a body relative to the Solar
    /// System Barycenter, chaining segments center by center (e.g. Moon →
    /// Earth-Moon barycenter → SSB).
    pub fn ssb_state(
        &self,
        target: i32,
        et_seconds: f64,
    ) -> Result<(Vector3<f64>, Vector3<f64>), SkywatchError> {
        let mut position = Vector3::zeros();
        let mut velocity = Vector3::zeros();
        let mut body = target;
        let mut hops = 0;
        while body != naif_ids::SOLAR_SYSTEM_BARYCENTER {
            if hops > 8 {
                return Err(SkywatchError::MissingSegment(target));
            }
            let segment = self
                .segments
                .get(&body)
                .ok_or(SkywatchError::MissingSegment(body))?;
            let (pos, vel) = self.segment_state(body, et_seconds)?;
            position += pos;
            velocity += vel;
            body = segment.summary.center;
            hops += 1;
        }
        Ok((position, velocity))
    }
}

/// Walk the doubly-linked summary-record chain and collect every summary.
fn read_summaries(
    file: &mut BufReader<File>,
    header: &DafHeader,
    path: &Path,
) -> Result<Vec<Summary>, SkywatchError> {
    let io_err = |e: std::io::Error| {
        SkywatchError::EphemerisUnavailable(format!(
            "cannot read summary record of {}: {e}",
            path.display()
        ))
    };
    let parse_err = |target: &str| {
        SkywatchError::EphemerisUnavailable(format!(
            "malformed summary record in {} ({target})",
            path.display()
        ))
    };

    let summary_bytes = header.summary_words() * 8;
    let mut summaries = Vec::new();
    let mut record_idx = header.fward as u64;
    while record_idx != 0 {
        let mut record = [0u8; RECORD_BYTES];
        file.seek(SeekFrom::Start((record_idx - 1) * RECORD_BYTES as u64))
            .map_err(io_err)?;
        file.read_exact(&mut record).map_err(io_err)?;

        // The record starts with three doubles: NEXT, PREV, NSUM.
        let control: Vec<f64> = record[..24]
            .chunks_exact(8)
            .map(|chunk| f64::from_le_bytes(chunk.try_into().expect("8-byte chunk")))
            .collect();
        let next = control[0] as u64;
        let nsum = control[2] as usize;
        if nsum > (RECORD_BYTES - 24) / summary_bytes {
            return Err(parse_err("summary count exceeds record capacity"));
        }

        let mut offset = 24;
        for _ in 0..nsum {
            let (_, summary) = Summary::parse(&record[offset..offset + summary_bytes])
                .map_err(|_| parse_err("summary"))?;
            summaries.push(summary);
            offset += summary_bytes;
        }
        record_idx = next;
    }
    Ok(summaries)
}

#[cfg(test)]
mod test_spk_kernel {
    use super::*;
    use std::path::PathBuf;

    /// Three-record kernel image: DAF header, one summary record with a
    /// single type-2 summary (body 301 around 3), one empty data record.
    fn kernel_bytes(nsum: f64, initial_addr: i32, final_addr: i32) -> Vec<u8> {
        let mut buf = vec![0u8; 3 * RECORD_BYTES];
        buf[0..8].copy_from_slice(b"DAF/SPK ");
        buf[8..12].copy_from_slice(&2i32.to_le_bytes());
        buf[12..16].copy_from_slice(&6i32.to_le_bytes());
        buf[76..80].copy_from_slice(&2i32.to_le_bytes());
        buf[80..84].copy_from_slice(&2i32.to_le_bytes());
        buf[84..88].copy_from_slice(&385i32.to_le_bytes());
        buf[88..96].copy_from_slice(b"LTL-IEEE");

        let base = RECORD_BYTES;
        for (slot, word) in [0.0, 0.0, nsum].into_iter().enumerate() {
            buf[base + slot * 8..base + slot * 8 + 8].copy_from_slice(&word.to_le_bytes());
        }
        let mut offset = base + 24;
        for epoch in [-1.0e9f64, 1.0e9] {
            buf[offset..offset + 8].copy_from_slice(&epoch.to_le_bytes());
            offset += 8;
        }
        for v in [301i32, 3, 1, 2, initial_addr, final_addr] {
            buf[offset..offset + 4].copy_from_slice(&v.to_le_bytes());
            offset += 4;
        }
        buf
    }

    fn put_f64s(buf: &mut [u8], word_addr: usize, words: &[f64]) {
        let mut pos = (word_addr - 1) * 8;
        for word in words {
            buf[pos..pos + 8].copy_from_slice(&word.to_le_bytes());
            pos += 8;
        }
    }

    fn write_kernel(name: &str, buf: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("skywatch_{}_{name}", std::process::id()));
        std::fs::write(&path, buf).unwrap();
        path
    }

    #[test]
    fn test_load_missing_file() {
        let err = SpkKernel::load(Path::new("/nonexistent/de421.bsp")).unwrap_err();
        assert!(matches!(err, SkywatchError::EphemerisUnavailable(_)));
    }

    #[test]
    fn test_load_minimal_kernel() {
        // One record of a single constant coefficient per axis, directory in
        // the last four words of the segment.
        let mut buf = kernel_bytes(1.0, 257, 265);
        put_f64s(&mut buf, 257, &[0.0, 1.0e9, 7.0, 8.0, 9.0]);
        put_f64s(&mut buf, 262, &[-1.0e9, 2.0e9, 5.0, 1.0]);
        let path = write_kernel("minimal.bsp", &buf);

        let kernel = SpkKernel::load(&path).unwrap();
        assert!(kernel.has_target(301));
        let (pos, vel) = kernel.segment_state(301, 0.0).unwrap();
        assert_eq!(pos, Vector3::new(7.0, 8.0, 9.0));
        assert_eq!(vel, Vector3::zeros());

        // The chain to the barycenter stops at the absent center body.
        assert_eq!(
            kernel.ssb_state(301, 0.0).unwrap_err(),
            SkywatchError::MissingSegment(3)
        );
    }

    #[test]
    fn test_load_rejects_corrupt_address_range() {
        // final_addr before the segment start cannot hold a directory.
        let path = write_kernel("bad_addr.bsp", &kernel_bytes(1.0, 257, 2));
        let err = SpkKernel::load(&path).unwrap_err();
        assert!(matches!(err, SkywatchError::EphemerisUnavailable(_)));
    }

    #[test]
    fn test_load_rejects_address_beyond_file_end() {
        let path = write_kernel("bad_end.bsp", &kernel_bytes(1.0, 257, 100_000));
        let err = SpkKernel::load(&path).unwrap_err();
        assert!(matches!(err, SkywatchError::EphemerisUnavailable(_)));
    }

    #[test]
    fn test_load_rejects_undersized_records() {
        // rsize 4 cannot hold mid, radius and one coefficient per axis.
        let mut buf = kernel_bytes(1.0, 257, 264);
        put_f64s(&mut buf, 261, &[-1.0e9, 2.0e9, 4.0, 1.0]);
        let path = write_kernel("bad_rsize.bsp", &buf);
        let err = SpkKernel::load(&path).unwrap_err();
        assert!(matches!(err, SkywatchError::EphemerisUnavailable(_)));
    }

    #[test]
    fn test_load_rejects_oversized_summary_count() {
        // A 1024-byte summary record holds at most 25 five-word summaries.
        let path = write_kernel("bad_nsum.bsp", &kernel_bytes(1000.0, 257, 265));
        let err = SpkKernel::load(&path).unwrap_err();
        assert!(matches!(err, SkywatchError::EphemerisUnavailable(_)));
    }
}
