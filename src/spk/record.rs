//! Ephemeris record decoding and Chebyshev interpolation.
//!
//! A type-2 record holds the record midpoint `mid` and half-interval `radius`
//! (both ET seconds) followed by `ncoeff` Chebyshev coefficients per axis for
//! the position in kilometers. The normalized time is
//! `t = (et - mid) / radius`, clamped to [-1, 1]; position uses `T_n(t)` and
//! velocity uses `T'_n(t)` scaled by the chain-rule factor `1 / radius`.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};

use nalgebra::Vector3;

/// One SPK type-2 record: midpoint, half-width and per-axis Chebyshev
/// coefficients for the position in km.
#[derive(Debug, Clone, PartialEq)]
pub struct SpkRecord {
    /// Midpoint of the record time span (ET seconds from J2000 TDB).
    pub mid: f64,
    /// Half-width of the record interval (seconds).
    pub radius: f64,
    /// Chebyshev coefficients for X (km).
    pub x: Vec<f64>,
    /// Chebyshev coefficients for Y (km).
    pub y: Vec<f64>,
    /// Chebyshev coefficients for Z (km).
    pub z: Vec<f64>,
}

impl SpkRecord {
    /// Decode one record from `rsize` little-endian DP-words.
    fn decode(words: &[f64]) -> SpkRecord {
        // Layout: mid, radius, then ncoeff words per axis.
        let ncoeff = (words.len() - 2) / 3;
        SpkRecord {
            mid: words[0],
            radius: words[1],
            x: words[2..2 + ncoeff].to_vec(),
            y: words[2 + ncoeff..2 + 2 * ncoeff].to_vec(),
            z: words[2 + 2 * ncoeff..2 + 3 * ncoeff].to_vec(),
        }
    }

    /// Read `n_records` tightly packed records starting at `initial_addr`
    /// (DP-words, 1-based), each `rsize` DP-words long.
    pub fn read_segment(
        file: &mut BufReader<File>,
        initial_addr: usize,
        rsize: usize,
        n_records: usize,
    ) -> std::io::Result<Vec<SpkRecord>> {
        let mut raw = vec![0u8; rsize * n_records * 8];
        file.seek(SeekFrom::Start(((initial_addr - 1) * 8) as u64))?;
        file.read_exact(&mut raw)?;

        let words: Vec<f64> = raw
            .chunks_exact(8)
            .map(|chunk| f64::from_le_bytes(chunk.try_into().expect("8-byte chunk")))
            .collect();

        Ok(words.chunks_exact(rsize).map(SpkRecord::decode).collect())
    }

    /// Interpolate Cartesian position (km) and velocity (km/s) at an ET epoch.
    pub fn interpolate(&self, et_seconds: f64) -> (Vector3<f64>, Vector3<f64>) {
        let t = ((et_seconds - self.mid) / self.radius).clamp(-1.0, 1.0);
        let n = self.x.len();

        // T_0 = 1, T_1 = t, T_n = 2 t T_{n-1} - T_{n-2}
        let mut poly = vec![0.0; n];
        poly[0] = 1.0;
        if n > 1 {
            poly[1] = t;
            for k in 2..n {
                poly[k] = 2.0 * t * poly[k - 1] - poly[k - 2];
            }
        }

        // T'_1 = 1, T'_2 = 4 t, T'_n = 2 t T'_{n-1} + 2 T_{n-1} - T'_{n-2}
        let mut deriv = vec![0.0; n];
        if n > 1 {
            deriv[1] = 1.0;
        }
        if n > 2 {
            deriv[2] = 4.0 * t;
            for k in 3..n {
                deriv[k] = 2.0 * t * deriv[k - 1] + 2.0 * poly[k - 1] - deriv[k - 2];
            }
        }

        let dot = |coeffs: &[f64], basis: &[f64]| -> f64 {
            coeffs.iter().zip(basis).map(|(c, b)| c * b).sum()
        };

        let position = Vector3::new(
            dot(&self.x, &poly),
            dot(&self.y, &poly),
            dot(&self.z, &poly),
        );
        let scale = 1.0 / self.radius;
        let velocity = Vector3::new(
            dot(&self.x, &deriv) * scale,
            dot(&self.y, &deriv) * scale,
            dot(&self.z, &deriv) * scale,
        );

        (position, velocity)
    }
}

#[cfg(test)]
mod test_spk_record {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_decode_layout() {
        let words = [10.0, 5.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let record = SpkRecord::decode(&words);
        assert_eq!(record.mid, 10.0);
        assert_eq!(record.radius, 5.0);
        assert_eq!(record.x, vec![1.0, 2.0, 3.0]);
        assert_eq!(record.y, vec![4.0, 5.0, 6.0]);
        assert_eq!(record.z, vec![7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_interpolation_of_known_series() {
        // x = T_1(t) = t, y = T_2(t) = 2t² - 1, z = 2·T_0(t) = 2.
        let record = SpkRecord {
            mid: 0.0,
            radius: 86400.0,
            x: vec![0.0, 1.0, 0.0],
            y: vec![0.0, 0.0, 1.0],
            z: vec![2.0, 0.0, 0.0],
        };

        let (pos, vel) = record.interpolate(43200.0); // t = 0.5
        assert_relative_eq!(pos.x, 0.5, epsilon = 1e-15);
        assert_relative_eq!(pos.y, -0.5, epsilon = 1e-15);
        assert_relative_eq!(pos.z, 2.0, epsilon = 1e-15);

        // dx/det = 1 · (1/radius), dy/det = 4t · (1/radius), dz/det = 0.
        assert_relative_eq!(vel.x, 1.0 / 86400.0, epsilon = 1e-18);
        assert_relative_eq!(vel.y, 2.0 / 86400.0, epsilon = 1e-18);
        assert_relative_eq!(vel.z, 0.0, epsilon = 1e-18);
    }

    #[test]
    fn test_velocity_matches_analytic_slope() {
        // x = T_1(s) ramps by one km over the half-interval, so the time
        // derivative is exactly 1/radius km/s everywhere in the record.
        let record = SpkRecord {
            mid: 0.0,
            radius: 100.0,
            x: vec![0.0, 1.0],
            y: vec![0.0, 0.0],
            z: vec![0.0, 0.0],
        };
        let (_, vel) = record.interpolate(37.0);
        assert_relative_eq!(vel.x, 0.01, epsilon = 1e-15);
    }

    #[test]
    fn test_interpolation_clamps_outside_interval() {
        let record = SpkRecord {
            mid: 0.0,
            radius: 100.0,
            x: vec![0.0, 1.0],
            y: vec![0.0, 1.0],
            z: vec![0.0, 1.0],
        };
        let (at_edge, _) = record.interpolate(100.0);
        let (beyond, _) = record.interpolate(250.0);
        assert_eq!(at_edge, beyond);
    }
}
